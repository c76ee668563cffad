use crate::device::Sensor;
use crate::properties;

macro_rules! register {
    ($($module:ident),+) => {
        paste::paste! {
            $(
                pub mod $module;

                const _: () = assert!(!$module::Device::PROPERTIES.modes.is_empty());
            )+

            #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
            #[serde(rename_all = "snake_case")]
            pub enum Type {
                $(
                    [<$module:camel>],
                )+
            }

            impl std::fmt::Display for Type {
                fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    match self {
                        $(
                            Self::[<$module:camel>] => write!(formatter, stringify!($module)),
                        )+
                    }
                }
            }

            impl Type {
                pub const ALL: &'static [Type] = &[$(Type::[<$module:camel>],)+];

                pub fn name(self) -> &'static str {
                    match self {
                        $(
                            Type::[<$module:camel>] => $module::Device::PROPERTIES.name,
                        )+
                    }
                }

                pub fn compatible(self) -> &'static str {
                    match self {
                        $(
                            Type::[<$module:camel>] => $module::Device::COMPATIBLE,
                        )+
                    }
                }

                pub fn properties(self) -> &'static properties::SensorConfig {
                    match self {
                        $(
                            Type::[<$module:camel>] => {
                                static PROPERTIES: properties::SensorConfig = $module::Device::PROPERTIES;
                                &PROPERTIES
                            }
                        )+
                    }
                }

                pub fn from_compatible(compatible: &str) -> Option<Self> {
                    $(
                        if compatible == $module::Device::COMPATIBLE {
                            return Some(Type::[<$module:camel>]);
                        }
                    )+
                    None
                }
            }

            #[derive(Debug, PartialEq, Eq)]
            pub struct ParseTypeError {
                on: String
            }

            impl std::fmt::Display for ParseTypeError {
                fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    write!(formatter, "unknown sensor type \"{}\"", self.on)
                }
            }

            impl std::error::Error for ParseTypeError {}

            impl std::str::FromStr for Type {
                type Err = ParseTypeError;

                fn from_str(string: &str) -> Result<Self, Self::Err> {
                    match string {
                        $(
                            stringify!($module) => Ok(Self::[<$module:camel>]),
                        )+
                        _ => Err(Self::Err {on: string.to_owned()}),
                    }
                }
            }
        }
    };
}

register! { ov6211, ox03c10, ox03c10_v2, ox03j10 }
