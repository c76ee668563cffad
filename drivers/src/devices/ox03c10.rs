use crate::device;
use crate::modes;
use crate::power;
use crate::properties;
use crate::registers;
use omnivision_types as types;

pub struct Device;

impl device::Sensor for Device {
    const COMPATIBLE: &'static str = "ovti,ox03c10";

    const PROPERTIES: properties::SensorConfig = properties::SensorConfig {
        name: "ox03c10",
        chip_id: properties::ChipId {
            register: 0x300a,
            width: 2,
            expected: 0x5803,
        },
        version_register: None,
        // the shared register tables assume a 27 MHz input clock
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
        exposure: properties::Exposure::Shifted { register: 0x3500 },
        exposure_limits: properties::ExposureLimits {
            minimum: 4,
            step: 1,
            guard_band: 20,
        },
        gain: properties::Gain::Masked {
            register: 0x350a,
            mask: 0x3ff,
        },
        gain_range: properties::Range {
            minimum: 0x10,
            maximum: 0x3e0,
            step: 1,
            default: 0x20,
        },
        mirror: properties::Flip::SetBit {
            register: 0x3821,
            bit: 0x01,
            disable_mask: 0xf9,
        },
        flip: properties::Flip::SetBit {
            register: 0x3820,
            bit: 0x01,
            disable_mask: 0x9f,
        },
        test_pattern: Some(properties::TestPattern {
            register: 0x5e00,
            enable: 0x80,
            disable: 0x00,
            menu: &properties::VERTICAL_COLOR_BARS,
        }),
        modes: &MODES,
        global_registers: registers::RegisterList(&GLOBAL_REGISTERS),
        delay_unit: registers::DelayUnit::Milliseconds,
        stream_settle_us: None,
        diagnostic_registers: &[],
        raw_colorspace: false,
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
    registers: registers::RegisterList(&MODE_1920X1280_REGISTERS),
    hdr_mode: types::HdrMode::Normal,
    virtual_channels: [0; 4],
}];

pub const GLOBAL_REGISTERS: [(u16, u16); 78] = [
    (0x3700, 0x28),
    (0x3701, 0x15),
    (0x3702, 0x19),
    (0x3703, 0x23),
    (0x3704, 0x0a),
    (0x3705, 0x00),
    (0x3706, 0x3e),
    (0x3707, 0x0d),
    (0x3708, 0x50),
    (0x3709, 0x5a),
    (0x370a, 0x00),
    (0x370b, 0x96),
    (0x3711, 0x11),
    (0x3712, 0x13),
    (0x3717, 0x02),
    (0x3718, 0x73),
    (0x372c, 0x40),
    (0x3733, 0x01),
    (0x3738, 0x36),
    (0x3739, 0x36),
    (0x373a, 0x25),
    (0x373b, 0x25),
    (0x373f, 0x21),
    (0x3740, 0x21),
    (0x3741, 0x21),
    (0x3742, 0x21),
    (0x3747, 0x28),
    (0x3748, 0x28),
    (0x3749, 0x19),
    (0x3755, 0x1a),
    (0x3756, 0x0a),
    (0x3757, 0x1c),
    (0x3765, 0x19),
    (0x3766, 0x05),
    (0x3767, 0x05),
    (0x3768, 0x13),
    (0x376c, 0x07),
    (0x3778, 0x20),
    (0x377c, 0xc8),
    (0x3781, 0x02),
    (0x3783, 0x02),
    (0x379c, 0x58),
    (0x379e, 0x00),
    (0x379f, 0x00),
    (0x37a0, 0x00),
    (0x37bc, 0x22),
    (0x37c0, 0x01),
    (0x37c4, 0x3e),
    (0x37c5, 0x3e),
    (0x37c6, 0x2a),
    (0x37c7, 0x28),
    (0x37c8, 0x02),
    (0x37c9, 0x12),
    (0x37cb, 0x29),
    (0x37cd, 0x29),
    (0x37d2, 0x00),
    (0x37d3, 0x73),
    (0x37d6, 0x00),
    (0x37d7, 0x6b),
    (0x37dc, 0x00),
    (0x37df, 0x54),
    (0x37e2, 0x00),
    (0x37e3, 0x00),
    (0x37f8, 0x00),
    (0x37f9, 0x01),
    (0x37fa, 0x00),
    (0x37fb, 0x19),
    (0x3820, 0x20),
    (0x4319, 0x03),
    (0x431f, 0x20),
    (0x4008, 0x02),
    (0x4009, 0x03),
    (0x4f00, 0x00),
    (0x4f01, 0x00),
    (0x4f02, 0x80),
    (0x4f03, 0x2c),
    (0x4f04, 0xf8),
    (registers::REG_NULL, 0x00),
];

pub const MODE_1920X1280_REGISTERS: [(u16, u16); 2] = [
    (0x3012, 0x21),
    (registers::REG_NULL, 0x00),
];
