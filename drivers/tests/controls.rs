mod common;

use omnivision_drivers::controls;
use omnivision_drivers::{ControlId, Error, Type};

#[test]
fn vertical_blanking_bounds_exposure() {
    let harness = common::Harness::for_sensor(Type::Ox03c10V2);
    let driver = harness.attach(Type::Ox03c10V2).unwrap();
    let exposure = driver.control(ControlId::Exposure).unwrap();
    assert_eq!(exposure.maximum, 1574 - 8);
    assert_eq!(exposure.value, 256);

    assert_eq!(driver.set_control(ControlId::VerticalBlanking, 1000), Ok(1000));
    assert_eq!(
        driver.control(ControlId::Exposure).unwrap().maximum,
        1280 + 1000 - 8
    );
    assert_eq!(driver.set_control(ControlId::Exposure, 2000), Ok(2000));

    driver.s_power(true).unwrap();
    harness.clear();
    assert_eq!(driver.set_control(ControlId::VerticalBlanking, 500), Ok(500));
    let exposure = driver.control(ControlId::Exposure).unwrap();
    assert_eq!(exposure.maximum, 1772);
    assert_eq!(exposure.value, 1772);
    assert_eq!(
        harness.writes(),
        vec![(0x3501, vec![0x06, 0xec]), (0x380e, vec![0x06, 0xf4])]
    );
}

#[test]
fn writes_wait_for_an_active_device() {
    let harness = common::Harness::for_sensor(Type::Ox03c10V2);
    let driver = harness.attach(Type::Ox03c10V2).unwrap();
    harness.clear();
    assert_eq!(driver.set_control(ControlId::Exposure, 1000), Ok(1000));
    assert!(harness.events().is_empty());
    assert_eq!(driver.control(ControlId::Exposure).unwrap().value, 1000);

    driver.s_power(true).unwrap();
    harness.clear();
    assert_eq!(driver.set_control(ControlId::Exposure, 1001), Ok(1001));
    assert_eq!(harness.writes(), vec![(0x3501, vec![0x03, 0xe9])]);
}

#[test]
fn split_gain_caps_analog_and_scales_digital() {
    let harness = common::Harness::for_sensor(Type::Ox03c10V2);
    let driver = harness.attach(Type::Ox03c10V2).unwrap();
    driver.s_power(true).unwrap();
    harness.clear();

    driver.set_control(ControlId::AnalogueGain, 3000).unwrap();
    assert_eq!(
        harness.writes(),
        vec![(0x3508, vec![0x07, 0xc0]), (0x350a, vec![0x06, 0x0c])]
    );

    harness.clear();
    driver.set_control(ControlId::AnalogueGain, 0x100).unwrap();
    assert_eq!(
        harness.writes(),
        vec![(0x3508, vec![0x01, 0x00]), (0x350a, vec![0x04, 0x00])]
    );
}

#[test]
fn direct_exposure_writes_whole_lines() {
    let harness = common::Harness::for_sensor(Type::Ox03c10V2);
    let driver = harness.attach(Type::Ox03c10V2).unwrap();
    driver.s_power(true).unwrap();
    harness.clear();
    driver.set_control(ControlId::Exposure, 1000).unwrap();
    assert_eq!(harness.writes(), vec![(0x3501, vec![0x03, 0xe8])]);
}

#[test]
fn mirror_polarity_is_inverted_on_ox03c10_v2() {
    let harness = common::Harness::for_sensor(Type::Ox03c10V2);
    let driver = harness.attach(Type::Ox03c10V2).unwrap();
    driver.s_power(true).unwrap();
    assert_eq!(harness.register(0x3820), 0x20);

    harness.clear();
    driver.set_control(ControlId::HorizontalFlip, 1).unwrap();
    assert_eq!(harness.writes(), vec![(0x3820, vec![0x00])]);

    harness.clear();
    driver.set_control(ControlId::VerticalFlip, 1).unwrap();
    assert_eq!(harness.writes(), vec![(0x3820, vec![0x04])]);

    harness.clear();
    driver.set_control(ControlId::HorizontalFlip, 0).unwrap();
    assert_eq!(harness.writes(), vec![(0x3820, vec![0x24])]);
}

#[test]
fn flip_preserves_other_bits_on_ov6211() {
    let harness = common::Harness::for_sensor(Type::Ov6211);
    let driver = harness.attach(Type::Ov6211).unwrap();
    driver.s_power(true).unwrap();
    harness.set_registers(0x3821, &[0x06]);
    harness.set_registers(0x3820, &[0x40]);

    driver.set_control(ControlId::HorizontalFlip, 1).unwrap();
    assert_eq!(harness.register(0x3821), 0x07);
    driver.set_control(ControlId::HorizontalFlip, 0).unwrap();
    assert_eq!(harness.register(0x3821), 0x01);
    driver.set_control(ControlId::VerticalFlip, 1).unwrap();
    assert_eq!(harness.register(0x3820), 0x41);
}

#[test]
fn shifted_exposure_rounds_to_step() {
    let harness = common::Harness::for_sensor(Type::Ov6211);
    let driver = harness.attach(Type::Ov6211).unwrap();
    driver.s_power(true).unwrap();
    harness.clear();

    // 4 + 15 * 6
    assert_eq!(driver.set_control(ControlId::Exposure, 100), Ok(94));
    assert_eq!(harness.writes(), vec![(0x3500, vec![0x00, 0x05, 0xe0])]);

    // above the maximum 0x21a - 20
    let maximum = driver.control(ControlId::Exposure).unwrap().maximum;
    assert_eq!(maximum, 518);
    assert_eq!(driver.set_control(ControlId::Exposure, 10_000), Ok(514));
    assert_eq!(driver.set_control(ControlId::Exposure, -5), Ok(4));
}

#[test]
fn test_pattern_menu() {
    let harness = common::Harness::for_sensor(Type::Ov6211);
    let driver = harness.attach(Type::Ov6211).unwrap();
    driver.s_power(true).unwrap();
    harness.clear();

    driver.set_control(ControlId::TestPattern, 2).unwrap();
    assert_eq!(harness.writes(), vec![(0x5e00, vec![0x81])]);
    harness.clear();
    driver.set_control(ControlId::TestPattern, 0).unwrap();
    assert_eq!(harness.writes(), vec![(0x5e00, vec![0x00])]);

    assert_eq!(
        driver.set_control(ControlId::TestPattern, 5),
        Err(Error::Control(controls::Error::InvalidValue {
            id: ControlId::TestPattern,
            value: 5,
        }))
    );
    assert_eq!(driver.control(ControlId::TestPattern).unwrap().value, 0);
}

#[test]
fn unchanged_value_is_not_written() {
    let harness = common::Harness::for_sensor(Type::Ov6211);
    let driver = harness.attach(Type::Ov6211).unwrap();
    driver.s_power(true).unwrap();
    harness.clear();
    assert_eq!(driver.set_control(ControlId::AnalogueGain, 0x20), Ok(0x20));
    assert!(harness.events().is_empty());
}

#[test]
fn rejected_controls() {
    let harness = common::Harness::for_sensor(Type::Ox03c10V2);
    let driver = harness.attach(Type::Ox03c10V2).unwrap();
    assert_eq!(
        driver.set_control(ControlId::LinkFrequency, 0),
        Err(Error::Control(controls::Error::ReadOnly(
            ControlId::LinkFrequency
        )))
    );
    assert_eq!(
        driver.set_control(ControlId::HorizontalBlanking, 100),
        Err(Error::Control(controls::Error::ReadOnly(
            ControlId::HorizontalBlanking
        )))
    );
    assert_eq!(
        driver.set_control(ControlId::TestPattern, 1),
        Err(Error::Control(controls::Error::Unknown(
            ControlId::TestPattern
        )))
    );
}

#[test]
fn read_only_values_follow_the_mode() {
    let harness = common::Harness::for_sensor(Type::Ox03j10);
    let driver = harness.attach(Type::Ox03j10).unwrap();
    assert_eq!(
        driver.control(ControlId::LinkFrequency).unwrap().kind,
        controls::Kind::IntegerMenu(&[240_000_000])
    );
    assert_eq!(
        driver.control(ControlId::PixelRate).unwrap().value,
        240_000_000 * 2 * 2 / 10
    );
    let hblank = driver.control(ControlId::HorizontalBlanking).unwrap();
    let expected = 0x420 - 1920;
    assert_eq!(
        (hblank.minimum, hblank.maximum, hblank.value),
        (expected, expected, expected)
    );
    let ids = driver
        .controls()
        .iter()
        .map(|control| control.id)
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            ControlId::LinkFrequency,
            ControlId::PixelRate,
            ControlId::HorizontalBlanking,
            ControlId::VerticalBlanking,
            ControlId::Exposure,
            ControlId::AnalogueGain,
            ControlId::TestPattern,
            ControlId::HorizontalFlip,
            ControlId::VerticalFlip,
        ]
    );
}

#[test]
fn failed_vblank_write_keeps_exposure_bound_to_the_stored_vblank() {
    let harness = common::Harness::for_sensor(Type::Ox03c10V2);
    let driver = harness.attach(Type::Ox03c10V2).unwrap();
    driver.s_power(true).unwrap();
    harness.fail_register(0x380e);
    assert!(matches!(
        driver.set_control(ControlId::VerticalBlanking, 1000),
        Err(Error::Io(_))
    ));
    assert_eq!(driver.control(ControlId::VerticalBlanking).unwrap().value, 294);
    assert_eq!(driver.control(ControlId::Exposure).unwrap().maximum, 1566);
    assert_eq!(driver.set_control(ControlId::Exposure, 2000), Ok(1566));
}

#[test]
fn read_only_and_absent_controls_write_nothing() {
    let mut transport = omnivision_drivers::Transport::new(
        embedded_hal_mock::eh1::i2c::Mock::new(&[]),
        common::ADDRESS,
    );
    let ov6211 = Type::Ov6211.properties();
    for id in [
        ControlId::LinkFrequency,
        ControlId::PixelRate,
        ControlId::HorizontalBlanking,
    ] {
        assert_eq!(
            controls::write(&mut transport, ov6211, ov6211.default_mode(), id, 1),
            Ok(())
        );
    }
    let ox03c10_v2 = Type::Ox03c10V2.properties();
    assert_eq!(
        controls::write(
            &mut transport,
            ox03c10_v2,
            ox03c10_v2.default_mode(),
            ControlId::TestPattern,
            1
        ),
        Ok(())
    );
    transport.release().done();
}
