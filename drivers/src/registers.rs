use crate::transport;

pub const REG_DELAY: u16 = 0xfffe;
pub const REG_NULL: u16 = 0xffff;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DelayUnit {
    Milliseconds,
    Microseconds,
}

impl DelayUnit {
    pub fn microseconds(self, value: u16) -> u32 {
        match self {
            DelayUnit::Milliseconds => value as u32 * 1000,
            DelayUnit::Microseconds => value as u32,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Entry {
    Write { address: u16, value: u16 },
    Delay(u16),
}

/// Register writes terminated by `REG_NULL`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RegisterList(pub &'static [(u16, u16)]);

impl RegisterList {
    pub const EMPTY: RegisterList = RegisterList(&[(REG_NULL, 0x00)]);

    pub fn entries(self) -> impl Iterator<Item = Entry> {
        self.0
            .iter()
            .take_while(|(address, _)| *address != REG_NULL)
            .map(|&(address, value)| {
                if address == REG_DELAY {
                    Entry::Delay(value)
                } else {
                    Entry::Write { address, value }
                }
            })
    }

    pub fn len(self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(self) -> bool {
        self.entries().next().is_none()
    }
}

pub fn apply<I2C, Delay>(
    transport: &mut transport::Transport<I2C>,
    delay: &mut Delay,
    list: RegisterList,
    unit: DelayUnit,
) -> Result<(), transport::Error>
where
    I2C: embedded_hal::i2c::I2c,
    Delay: embedded_hal::delay::DelayNs,
{
    for entry in list.entries() {
        match entry {
            Entry::Write { address, value } => {
                if let Err(error) =
                    transport.write(address, transport::VALUE_08BIT, value as u32)
                {
                    log::error!("writing 0x{address:04x} = 0x{value:02x} failed: {error}");
                    return Err(error);
                }
            }
            Entry::Delay(value) => delay.delay_us(unit.microseconds(value)),
        }
    }
    Ok(())
}
