use crate::registers;
use omnivision_types as types;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedMode {
    pub width: u32,
    pub height: u32,
    pub code: types::MbusCode,
    pub max_fps: types::Fraction,
    pub exp_def: u32,
    pub hts_def: u32,
    pub vts_def: u32,
    pub registers: registers::RegisterList,
    pub hdr_mode: types::HdrMode,

    /// Virtual channel per pad.
    pub virtual_channels: [u8; 4],
}

impl SupportedMode {
    pub fn distance(&self, width: u32, height: u32) -> u32 {
        self.width.abs_diff(width) + self.height.abs_diff(height)
    }

    pub fn hblank(&self) -> i64 {
        self.hts_def as i64 - self.width as i64
    }

    pub fn vblank_default(&self) -> i64 {
        self.vts_def as i64 - self.height as i64
    }

    pub fn virtual_channel(&self, pad: usize) -> u8 {
        if self.hdr_mode != types::HdrMode::Normal && pad < self.virtual_channels.len() {
            self.virtual_channels[pad]
        } else {
            self.virtual_channels[0]
        }
    }

    pub fn format(&self, colorspace: types::Colorspace, pad: usize) -> types::FrameFormat {
        types::FrameFormat {
            width: self.width,
            height: self.height,
            code: self.code,
            field: types::Field::None,
            colorspace,
            ycbcr_encoding: match colorspace {
                types::Colorspace::Raw => types::YcbcrEncoding::Bt601,
                types::Colorspace::Default => types::YcbcrEncoding::Default,
            },
            virtual_channel: Some(self.virtual_channel(pad)),
        }
    }

    pub fn frame_interval(&self) -> types::FrameInterval {
        types::FrameInterval {
            code: self.code,
            width: self.width,
            height: self.height,
            interval: self.max_fps,
            hdr_mode: self.hdr_mode,
        }
    }
}

/// Closest mode by L1 distance, the earliest entry wins ties.
pub fn find_best_fit(
    modes: &'static [SupportedMode],
    width: u32,
    height: u32,
) -> &'static SupportedMode {
    // modes is never empty (checked at compile time in devices)
    let mut best = &modes[0];
    let mut best_distance = best.distance(width, height);
    for mode in &modes[1..] {
        let distance = mode.distance(width, height);
        if distance < best_distance {
            best = mode;
            best_distance = distance;
        }
    }
    best
}

pub fn find_hdr_mode(
    modes: &'static [SupportedMode],
    width: u32,
    height: u32,
    hdr_mode: types::HdrMode,
) -> Option<&'static SupportedMode> {
    modes
        .iter()
        .find(|mode| mode.width == width && mode.height == height && mode.hdr_mode == hdr_mode)
}
