use crate::properties;

pub trait Sensor {
    /// Device-tree compatible string.
    const COMPATIBLE: &'static str;

    const PROPERTIES: properties::SensorConfig;
}
