use crate::device;
use crate::modes;
use crate::power;
use crate::properties;
use crate::registers;
use omnivision_types as types;

pub struct Device;

impl device::Sensor for Device {
    const COMPATIBLE: &'static str = "ovti,ov6211";

    const PROPERTIES: properties::SensorConfig = properties::SensorConfig {
        name: "ov6211",
        chip_id: properties::ChipId {
            register: 0x300a,
            width: 1,
            expected: 0x67,
        },
        version_register: None,
        timing: power::Timing {
            clock_hz: 24_000_000,
            settle_us: 6000,
            settle_without_reset_us: 12000,
            power_up_cycles: Some(8192),
        },
        lanes: 1,
        bits_per_sample: 10,
        link_frequencies: &[240_000_000],
        control_mode_register: 0x0100,
        vts_register: 0x380e,
        vts_max: 0xffff,
        exposure: properties::Exposure::Shifted { register: 0x3500 },
        exposure_limits: properties::ExposureLimits {
            minimum: 4,
            step: 0xf,
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
        global_registers: registers::RegisterList::EMPTY,
        delay_unit: registers::DelayUnit::Microseconds,
        stream_settle_us: Some(10000),
        diagnostic_registers: &[],
        raw_colorspace: false,
    };
}

const MODES: [modes::SupportedMode; 1] = [modes::SupportedMode {
    width: 400,
    height: 400,
    code: types::MbusCode::Sbggr10,
    max_fps: types::Fraction::new(10000, 1200000),
    exp_def: 0x00f8,
    hts_def: 0x03a1,
    vts_def: 0x021a,
    registers: registers::RegisterList(&MODE_400X400_REGISTERS),
    hdr_mode: types::HdrMode::Normal,
    virtual_channels: [0; 4],
}];

const MODE_400X400_REGISTERS: [(u16, u16); 123] = [
    (0x0103, 0x01),
    (0x0100, 0x00),
    (0x3005, 0x00),
    (0x3013, 0x12),
    (0x3014, 0x04),
    (0x3016, 0x10),
    (0x3017, 0x00),
    (0x3018, 0x00),
    (0x301a, 0x00),
    (0x301b, 0x00),
    (0x301c, 0x00),
    (0x3037, 0xf0),
    (0x3080, 0x01),
    (0x3081, 0x00),
    (0x3082, 0x01),
    (0x3098, 0x04),
    (0x3099, 0x28),
    (0x309a, 0x06),
    (0x309b, 0x04),
    (0x309c, 0x00),
    (0x309d, 0x00),
    (0x309e, 0x01),
    (0x309f, 0x00),
    (0x30b0, 0x0a),
    (0x30b1, 0x02),
    (0x30b2, 0x00),
    (0x30b3, 0x32),
    (0x30b4, 0x02),
    (0x30b5, 0x05),
    (0x3106, 0xd9),
    (0x3500, 0x00),
    (0x3501, 0x1b),
    (0x3502, 0x20),
    (0x3503, 0x07),
    (0x3509, 0x10),
    (0x350b, 0x10),
    (0x3620, 0xb7),
    (0x3621, 0x05),
    (0x3626, 0x31),
    (0x3627, 0x40),
    (0x3632, 0xa3),
    (0x3633, 0x34),
    (0x3634, 0x40),
    (0x3636, 0x00),
    (0x3660, 0x80),
    (0x3662, 0x01),
    (0x3664, 0xf0),
    (0x366a, 0x00),
    (0x366b, 0x50),
    (0x3680, 0xf4),
    (0x3681, 0x50),
    (0x3682, 0x00),
    (0x3708, 0x20),
    (0x3709, 0x40),
    (0x370d, 0x03),
    (0x373b, 0x02),
    (0x373c, 0x08),
    (0x3742, 0x00),
    (0x3744, 0x16),
    (0x3745, 0x08),
    (0x3781, 0xfc),
    (0x3788, 0x00),
    (0x3800, 0x00),
    (0x3801, 0x04),
    (0x3802, 0x00),
    (0x3803, 0x04),
    (0x3804, 0x01),
    (0x3805, 0x9b),
    (0x3806, 0x01),
    (0x3807, 0x9b),
    (0x3808, 0x01),
    (0x3809, 0x90),
    (0x380a, 0x01),
    (0x380b, 0x90),
    (0x380c, 0x05),
    (0x380d, 0xf2),
    (0x380e, 0x01),
    (0x380f, 0xb6),
    (0x3810, 0x00),
    (0x3811, 0x04),
    (0x3812, 0x00),
    (0x3813, 0x04),
    (0x3814, 0x11),
    (0x3815, 0x11),
    (0x3820, 0x00),
    (0x3821, 0x00),
    (0x382b, 0xfa),
    (0x382f, 0x04),
    (0x3832, 0x00),
    (0x3833, 0x05),
    (0x3834, 0x00),
    (0x3835, 0x05),
    (0x3882, 0x04),
    (0x3883, 0x00),
    (0x38a4, 0x10),
    (0x38a5, 0x00),
    (0x38b1, 0x03),
    (0x3b80, 0x00),
    (0x3b81, 0xa5),
    (0x3b82, 0x10),
    (0x3b83, 0x00),
    (0x3b84, 0x08),
    (0x3b85, 0x00),
    (0x3b86, 0x01),
    (0x3b87, 0x00),
    (0x3b88, 0x00),
    (0x3b89, 0x00),
    (0x3b8a, 0x00),
    (0x3b8b, 0x05),
    (0x3b8c, 0x00),
    (0x3b8d, 0x00),
    (0x3b8e, 0x00),
    (0x3b8f, 0x1a),
    (0x3b94, 0x05),
    (0x3b95, 0xf2),
    (0x3b96, 0xf0),
    (0x4004, 0x04),
    (0x404e, 0x01),
    (0x4801, 0x0f),
    (0x4806, 0x0f),
    (0x4837, 0x43),
    (0x0100, 0x01),
    (registers::REG_NULL, 0x00),
];
