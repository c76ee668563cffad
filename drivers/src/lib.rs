pub mod configuration;
pub mod controls;
pub mod device;
pub mod devices;
pub mod driver;
pub mod error;
pub mod ioctl;
pub mod modes;
pub mod power;
pub mod properties;
pub mod registers;
pub mod transport;

pub use crate::configuration::Identity;
pub use crate::controls::ControlId;
pub use crate::device::Sensor;
pub use crate::devices::Type;
pub use crate::driver::Client;
pub use crate::driver::SensorDriver;
pub use crate::error::Error;
pub use crate::ioctl::Command;
pub use crate::ioctl::Response;
pub use crate::power::Resources;
pub use crate::transport::Transport;

pub use bincode;
pub use embedded_hal;
pub use omnivision_types as types;
