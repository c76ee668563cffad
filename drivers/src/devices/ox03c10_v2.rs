use crate::device;
use crate::devices::ox03c10;
use crate::modes;
use crate::power;
use crate::properties;
use crate::registers;
use omnivision_types as types;

pub struct Device;

impl device::Sensor for Device {
    const COMPATIBLE: &'static str = "ovti,ox03c10-v2";

    const PROPERTIES: properties::SensorConfig = properties::SensorConfig {
        name: "ox03c10",
        chip_id: properties::ChipId {
            register: 0x300a,
            width: 3,
            expected: 0x580343,
        },
        version_register: None,
        timing: power::Timing {
            clock_hz: 27_000_000,
            settle_us: 16000,
            settle_without_reset_us: 16000,
            power_up_cycles: None,
        },
        lanes: 2,
        bits_per_sample: 12,
        link_frequencies: &[384_000_000],
        control_mode_register: 0x0100,
        vts_register: 0x380e,
        vts_max: 0xffff,
        exposure: properties::Exposure::Direct { register: 0x3501 },
        exposure_limits: properties::ExposureLimits {
            minimum: 2,
            step: 1,
            guard_band: 8,
        },
        gain: properties::Gain::Split {
            analog_register: 0x3508,
            digital_register: 0x350a,
            threshold: 1984,
            unity: 1024,
            analog_mask: 0x1fff,
            digital_mask: 0x3fff,
        },
        gain_range: properties::Range {
            minimum: 0x80,
            maximum: 0x7820,
            step: 1,
            default: 0x80,
        },
        mirror: properties::Flip::ClearBit {
            register: 0x3820,
            bit: 1 << 5,
        },
        flip: properties::Flip::SetBit {
            register: 0x3820,
            bit: 1 << 2,
            disable_mask: !(1 << 2),
        },
        test_pattern: None,
        modes: &MODES,
        global_registers: registers::RegisterList(&ox03c10::GLOBAL_REGISTERS),
        delay_unit: registers::DelayUnit::Milliseconds,
        stream_settle_us: None,
        diagnostic_registers: &[],
        raw_colorspace: true,
    };
}

const MODES: [modes::SupportedMode; 1] = [modes::SupportedMode {
    width: 1920,
    height: 1280,
    code: types::MbusCode::Sbggr12,
    max_fps: types::Fraction::new(10000, 300000),
    exp_def: 256,
    hts_def: 2140,
    vts_def: 1574,
    registers: registers::RegisterList(&ox03c10::MODE_1920X1280_REGISTERS),
    hdr_mode: types::HdrMode::Normal,
    virtual_channels: [0; 4],
}];
