use crate::device;
use crate::modes;
use crate::power;
use crate::properties;
use crate::registers;
use omnivision_types as types;

pub struct Device;

impl device::Sensor for Device {
    const COMPATIBLE: &'static str = "ovti,ox03j10";

    const PROPERTIES: properties::SensorConfig = properties::SensorConfig {
        name: "ox03j10",
        chip_id: properties::ChipId {
            register: 0x010a,
            width: 3,
            expected: 0x58034a,
        },
        version_register: Some(0x012a),
        timing: power::Timing {
            clock_hz: 24_000_000,
            settle_us: 16000,
            settle_without_reset_us: 16000,
            power_up_cycles: None,
        },
        lanes: 2,
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
        diagnostic_registers: &[0x1952, 0x21b0],
        raw_colorspace: false,
    };
}

const MODES: [modes::SupportedMode; 1] = [modes::SupportedMode {
    width: 1920,
    height: 1536,
    code: types::MbusCode::Sbggr10,
    max_fps: types::Fraction::new(10000, 300000),
    exp_def: 0x00f8,
    hts_def: 0x0420,
    vts_def: 0x069e,
    registers: registers::RegisterList(&MODE_1920X1536_REGISTERS),
    hdr_mode: types::HdrMode::Normal,
    virtual_channels: [0; 4],
}];

const MODE_1920X1536_REGISTERS: [(u16, u16); 14] = [
    (0x0112, 0x05),
    (0x166a, 0xff),
    (0x0301, 0x00),
    (0x0303, 0x00),
    (0x0304, 0x00),
    (0x0305, 0x64),
    (0x0306, 0x00),
    (0x0307, 0x09),
    (0x2100, 0x07),
    (0x210b, 0x80),
    (0x4880, 0xc1),
    (0x4882, 0x11),
    (0x4883, 0x11),
    (registers::REG_NULL, 0x00),
];
