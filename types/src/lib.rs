/// Media-bus pixel codes, numbered as in the Linux media-bus format table.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MbusCode {
    Sbggr10 = 0x3007,
    Sbggr12 = 0x3008,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    None = 1,
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Colorspace {
    Default = 0,
    Raw = 11,
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum YcbcrEncoding {
    Default = 0,
    Bt601 = 1,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Which {
    Try,
    Active,
}

#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HdrMode {
    Normal = 0,
    X2 = 5,
    X3 = 6,
}

#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EspMode {
    NormalVc = 0,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameFormat {
    pub width: u32,
    pub height: u32,
    pub code: MbusCode,
    pub field: Field,
    pub colorspace: Colorspace,
    pub ycbcr_encoding: YcbcrEncoding,
    pub virtual_channel: Option<u8>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameInterval {
    pub code: MbusCode,
    pub width: u32,
    pub height: u32,
    pub interval: Fraction,
    pub hdr_mode: HdrMode,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BusType {
    Csi2Dphy,
}

pub const CSI2_CHANNEL_0: u32 = 1 << 4;
pub const CSI2_CHANNEL_1: u32 = 1 << 5;
pub const CSI2_CHANNEL_2: u32 = 1 << 6;
pub const CSI2_CONTINUOUS_CLOCK: u32 = 1 << 8;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MbusConfig {
    pub bus_type: BusType,
    pub lanes: u8,
    pub hdr_mode: HdrMode,
}

impl MbusConfig {
    pub fn flags(&self) -> u32 {
        let mut flags = (1 << (self.lanes - 1)) | CSI2_CHANNEL_0 | CSI2_CONTINUOUS_CLOCK;
        if self.hdr_mode != HdrMode::Normal {
            flags |= CSI2_CHANNEL_1;
        }
        if self.hdr_mode == HdrMode::X3 {
            flags |= CSI2_CHANNEL_2;
        }
        flags
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}
