use crate::modes;
use crate::power;
use crate::registers;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChipId {
    pub register: u16,
    pub width: u8,
    pub expected: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exposure {
    /// 24-bit register whose low nibble holds fractional lines.
    Shifted { register: u16 },

    /// 16-bit register pair holding whole lines.
    Direct { register: u16 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gain {
    Masked {
        register: u16,
        mask: u32,
    },
    Split {
        analog_register: u16,
        digital_register: u16,
        threshold: u32,
        unity: u32,
        analog_mask: u32,
        digital_mask: u32,
    },
}

impl Gain {
    /// Returns (analog, digital) register values.
    pub fn split(&self, value: u32) -> (u32, Option<u32>) {
        match *self {
            Gain::Masked { mask, .. } => (value & mask, None),
            Gain::Split {
                threshold,
                unity,
                analog_mask,
                digital_mask,
                ..
            } => {
                let (analog, digital) = if value > threshold {
                    (threshold, value * unity / threshold)
                } else {
                    (value, unity)
                };
                (analog & analog_mask, Some(digital & digital_mask))
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flip {
    /// Enabling sets `bit`, disabling keeps only `disable_mask`.
    SetBit {
        register: u16,
        bit: u8,
        disable_mask: u8,
    },

    /// Enabling clears `bit`, disabling sets it.
    ClearBit { register: u16, bit: u8 },
}

impl Flip {
    pub fn register(&self) -> u16 {
        match self {
            Flip::SetBit { register, .. } | Flip::ClearBit { register, .. } => *register,
        }
    }

    pub fn apply(&self, current: u8, enabled: bool) -> u8 {
        match *self {
            Flip::SetBit {
                bit, disable_mask, ..
            } => {
                if enabled {
                    current | bit
                } else {
                    current & disable_mask
                }
            }
            Flip::ClearBit { bit, .. } => {
                if enabled {
                    current & !bit
                } else {
                    current | bit
                }
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TestPattern {
    pub register: u16,
    pub enable: u8,
    pub disable: u8,
    pub menu: &'static [&'static str],
}

impl TestPattern {
    pub fn value(&self, index: u32) -> u32 {
        if index > 0 {
            (index - 1) | self.enable as u32
        } else {
            self.disable as u32
        }
    }
}

pub const VERTICAL_COLOR_BARS: [&str; 5] = [
    "Disabled",
    "Vertical Color Bar Type 1",
    "Vertical Color Bar Type 2",
    "Vertical Color Bar Type 3",
    "Vertical Color Bar Type 4",
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Range {
    pub minimum: i64,
    pub maximum: i64,
    pub step: u64,
    pub default: i64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExposureLimits {
    pub minimum: i64,
    pub step: u64,
    pub guard_band: u32,
}

#[derive(Debug, Clone)]
pub struct SensorConfig {
    pub name: &'static str,
    pub chip_id: ChipId,
    pub version_register: Option<u16>,
    pub timing: power::Timing,
    pub lanes: u8,
    pub bits_per_sample: u8,
    pub link_frequencies: &'static [i64],
    pub control_mode_register: u16,
    pub vts_register: u16,
    pub vts_max: u32,
    pub exposure: Exposure,
    pub exposure_limits: ExposureLimits,
    pub gain: Gain,
    pub gain_range: Range,
    pub mirror: Flip,
    pub flip: Flip,
    pub test_pattern: Option<TestPattern>,
    pub modes: &'static [modes::SupportedMode],
    pub global_registers: registers::RegisterList,
    pub delay_unit: registers::DelayUnit,
    pub stream_settle_us: Option<u32>,
    pub diagnostic_registers: &'static [u16],
    pub raw_colorspace: bool,
}

pub const MODE_STREAMING: u32 = 0x01;
pub const MODE_SW_STANDBY: u32 = 0x00;

impl SensorConfig {
    pub fn link_frequency(&self) -> i64 {
        self.link_frequencies.first().copied().unwrap_or(0)
    }

    pub fn pixel_rate(&self) -> i64 {
        self.link_frequency() * 2 * self.lanes as i64 / self.bits_per_sample as i64
    }

    pub fn default_mode(&self) -> &'static modes::SupportedMode {
        let modes: &'static [modes::SupportedMode] = self.modes;
        // modes is never empty (checked at compile time in devices)
        &modes[0]
    }
}
