use crate::controls;
use crate::power;
use crate::transport;
use omnivision_types as types;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] transport::Error),

    #[error(transparent)]
    Power(#[from] power::Error),

    #[error(transparent)]
    Control(#[from] controls::Error),

    #[error("unexpected sensor id 0x{found:06x} (expected 0x{expected:06x})")]
    UnexpectedId { found: u32, expected: u32 },

    #[error("trial formats are not supported")]
    NotSupported,

    #[error("index {index} is out of range ({count} entries)")]
    OutOfRange { index: u32, count: u32 },

    #[error("media bus code {0:?} is not supported")]
    InvalidCode(types::MbusCode),

    #[error("no {width}x{height} mode with HDR mode {hdr_mode:?}")]
    HdrModeNotFound {
        width: u32,
        height: u32,
        hdr_mode: types::HdrMode,
    },

    #[error("could not get module information ({0})")]
    Configuration(String),
}
