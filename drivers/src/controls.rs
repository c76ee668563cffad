use crate::modes;
use crate::properties;
use crate::transport;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ControlId {
    LinkFrequency,
    PixelRate,
    HorizontalBlanking,
    VerticalBlanking,
    Exposure,
    AnalogueGain,
    TestPattern,
    HorizontalFlip,
    VerticalFlip,
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                ControlId::LinkFrequency => "link frequency",
                ControlId::PixelRate => "pixel rate",
                ControlId::HorizontalBlanking => "horizontal blanking",
                ControlId::VerticalBlanking => "vertical blanking",
                ControlId::Exposure => "exposure",
                ControlId::AnalogueGain => "analogue gain",
                ControlId::TestPattern => "test pattern",
                ControlId::HorizontalFlip => "horizontal flip",
                ControlId::VerticalFlip => "vertical flip",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Kind {
    Integer,
    Boolean,
    Menu(&'static [&'static str]),
    IntegerMenu(&'static [i64]),
}

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0} is not available on this sensor")]
    Unknown(ControlId),

    #[error("{0} is read-only")]
    ReadOnly(ControlId),

    #[error("{value} is not a valid {id} menu index")]
    InvalidValue { id: ControlId, value: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: ControlId,
    pub kind: Kind,
    pub minimum: i64,
    pub maximum: i64,
    pub step: u64,
    pub default: i64,
    pub value: i64,
    pub read_only: bool,
}

impl Control {
    pub fn integer(id: ControlId, range: properties::Range) -> Self {
        Self {
            id,
            kind: Kind::Integer,
            minimum: range.minimum,
            maximum: range.maximum,
            step: range.step,
            default: range.default,
            value: range.default,
            read_only: false,
        }
    }

    pub fn boolean(id: ControlId) -> Self {
        Self {
            id,
            kind: Kind::Boolean,
            minimum: 0,
            maximum: 1,
            step: 1,
            default: 0,
            value: 0,
            read_only: false,
        }
    }

    pub fn menu(id: ControlId, items: &'static [&'static str]) -> Self {
        Self {
            id,
            kind: Kind::Menu(items),
            minimum: 0,
            maximum: items.len() as i64 - 1,
            step: 1,
            default: 0,
            value: 0,
            read_only: false,
        }
    }

    pub fn integer_menu(id: ControlId, items: &'static [i64]) -> Self {
        Self {
            id,
            kind: Kind::IntegerMenu(items),
            minimum: 0,
            maximum: items.len() as i64 - 1,
            step: 1,
            default: 0,
            value: 0,
            read_only: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Clamps an integer or boolean to the range and rounds it to the closest step.
    pub fn round_to_range(&self, value: i64) -> i64 {
        let step = self.step.max(1) as i64;
        let half_step = step / 2;
        let value = if self.maximum >= 0 && value >= self.maximum - half_step {
            self.maximum
        } else {
            value.saturating_add(half_step)
        };
        let value = value.clamp(self.minimum, self.maximum.max(self.minimum));
        self.minimum + step * ((value - self.minimum) / step)
    }

    pub fn validate(&self, value: i64) -> Result<i64, Error> {
        match self.kind {
            Kind::Integer | Kind::Boolean => Ok(self.round_to_range(value)),
            Kind::Menu(_) | Kind::IntegerMenu(_) => {
                if value < self.minimum || value > self.maximum {
                    Err(Error::InvalidValue { id: self.id, value })
                } else {
                    Ok(value)
                }
            }
        }
    }
}

/// Controls in creation order.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    list: Vec<Control>,
}

impl Controls {
    pub fn new(config: &properties::SensorConfig, mode: &modes::SupportedMode) -> Self {
        let mut list = Vec::with_capacity(9);
        list.push(
            Control::integer_menu(ControlId::LinkFrequency, config.link_frequencies).read_only(),
        );
        let pixel_rate = config.pixel_rate();
        list.push(
            Control::integer(
                ControlId::PixelRate,
                properties::Range {
                    minimum: 0,
                    maximum: pixel_rate,
                    step: 1,
                    default: pixel_rate,
                },
            )
            .read_only(),
        );
        let hblank = mode.hblank();
        list.push(
            Control::integer(
                ControlId::HorizontalBlanking,
                properties::Range {
                    minimum: hblank,
                    maximum: hblank,
                    step: 1,
                    default: hblank,
                },
            )
            .read_only(),
        );
        let vblank = mode.vblank_default();
        list.push(Control::integer(
            ControlId::VerticalBlanking,
            properties::Range {
                minimum: vblank,
                maximum: config.vts_max as i64 - mode.height as i64,
                step: 1,
                default: vblank,
            },
        ));
        list.push(Control::integer(
            ControlId::Exposure,
            properties::Range {
                minimum: config.exposure_limits.minimum,
                maximum: mode.vts_def as i64 - config.exposure_limits.guard_band as i64,
                step: config.exposure_limits.step,
                default: mode.exp_def as i64,
            },
        ));
        list.push(Control::integer(ControlId::AnalogueGain, config.gain_range));
        if let Some(test_pattern) = config.test_pattern {
            list.push(Control::menu(ControlId::TestPattern, test_pattern.menu));
        }
        list.push(Control::boolean(ControlId::HorizontalFlip));
        list.push(Control::boolean(ControlId::VerticalFlip));
        Self { list }
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.list.iter().find(|control| control.id == id)
    }

    pub fn value(&self, id: ControlId) -> Option<i64> {
        self.get(id).map(|control| control.value)
    }

    fn get_mut(&mut self, id: ControlId) -> Result<&mut Control, Error> {
        self.list
            .iter_mut()
            .find(|control| control.id == id)
            .ok_or(Error::Unknown(id))
    }

    /// Returns the value the control would take, or None if it would not change.
    pub fn prepare(&self, id: ControlId, value: i64) -> Result<Option<i64>, Error> {
        let control = self.get(id).ok_or(Error::Unknown(id))?;
        if control.read_only {
            return Err(Error::ReadOnly(id));
        }
        let value = control.validate(value)?;
        Ok(if value == control.value {
            None
        } else {
            Some(value)
        })
    }

    pub fn store(&mut self, id: ControlId, value: i64) -> Result<(), Error> {
        self.get_mut(id)?.value = value;
        Ok(())
    }

    /// Updates the range and re-validates the current value; returns the new value if it moved.
    pub fn modify_range(
        &mut self,
        id: ControlId,
        range: properties::Range,
    ) -> Result<Option<i64>, Error> {
        let control = self.get_mut(id)?;
        control.minimum = range.minimum;
        control.maximum = range.maximum;
        control.step = range.step;
        control.default = range.default;
        let value = control.validate(control.value).unwrap_or(range.default);
        if value == control.value {
            Ok(None)
        } else {
            control.value = value;
            Ok(Some(value))
        }
    }

    /// Writable controls and their values, in creation order.
    pub fn writable(&self) -> Vec<(ControlId, i64)> {
        self.list
            .iter()
            .filter(|control| !control.read_only)
            .map(|control| (control.id, control.value))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.list.iter()
    }
}

/// Translates a control value into register writes.
pub fn write<I2C>(
    transport: &mut transport::Transport<I2C>,
    properties: &properties::SensorConfig,
    mode: &modes::SupportedMode,
    id: ControlId,
    value: i64,
) -> Result<(), transport::Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    match id {
        ControlId::Exposure => {
            log::debug!("set exposure 0x{value:x}");
            match properties.exposure {
                properties::Exposure::Shifted { register } => transport.write(
                    register,
                    transport::VALUE_24BIT,
                    (value as u32) << 4,
                ),
                properties::Exposure::Direct { register } => {
                    transport.write(register, transport::VALUE_16BIT, value as u32)
                }
            }
        }
        ControlId::AnalogueGain => {
            log::debug!("set analog gain 0x{value:x}");
            let (analog, digital) = properties.gain.split(value as u32);
            match properties.gain {
                properties::Gain::Masked { register, .. } => {
                    transport.write(register, transport::VALUE_16BIT, analog)
                }
                properties::Gain::Split {
                    analog_register,
                    digital_register,
                    ..
                } => {
                    let analog_result =
                        transport.write(analog_register, transport::VALUE_16BIT, analog);
                    let digital_result = match digital {
                        Some(digital) => {
                            transport.write(digital_register, transport::VALUE_16BIT, digital)
                        }
                        None => Ok(()),
                    };
                    analog_result.and(digital_result)
                }
            }
        }
        ControlId::VerticalBlanking => {
            log::debug!("set vblank 0x{value:x}");
            transport.write(
                properties.vts_register,
                transport::VALUE_16BIT,
                (value + mode.height as i64) as u32,
            )
        }
        ControlId::TestPattern => match properties.test_pattern {
            Some(test_pattern) => transport.write(
                test_pattern.register,
                transport::VALUE_08BIT,
                test_pattern.value(value as u32),
            ),
            None => {
                log::warn!("unhandled control {id} = 0x{value:x}");
                Ok(())
            }
        },
        ControlId::HorizontalFlip => write_flip(transport, properties.mirror, value != 0),
        ControlId::VerticalFlip => write_flip(transport, properties.flip, value != 0),
        ControlId::LinkFrequency | ControlId::PixelRate | ControlId::HorizontalBlanking => {
            log::warn!("unhandled control {id} = 0x{value:x}");
            Ok(())
        }
    }
}

fn write_flip<I2C>(
    transport: &mut transport::Transport<I2C>,
    flip: properties::Flip,
    enabled: bool,
) -> Result<(), transport::Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let register = flip.register();
    let current = transport.read(register, transport::VALUE_08BIT);
    let next = flip.apply(current.unwrap_or(0) as u8, enabled);
    let written = transport.write(register, transport::VALUE_08BIT, next as u32);
    current.map(|_| ()).and(written)
}
