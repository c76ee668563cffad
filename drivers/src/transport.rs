use embedded_hal::i2c::Error as _;

pub const VALUE_08BIT: u8 = 1;
pub const VALUE_16BIT: u8 = 2;
pub const VALUE_24BIT: u8 = 3;

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("register width must be between 1 and 4 bytes (got {0})")]
    InvalidWidth(u8),

    #[error("I2C transfer failed ({0:?})")]
    Transport(embedded_hal::i2c::ErrorKind),
}

/// Big-endian register access with 16-bit addresses.
pub struct Transport<I2C> {
    bus: I2C,
    address: u8,
}

impl<I2C> Transport<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(bus: I2C, address: u8) -> Self {
        Self { bus, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> I2C {
        self.bus
    }

    pub fn write(&mut self, register: u16, width: u8, value: u32) -> Result<(), Error> {
        if width == 0 || width > 4 {
            return Err(Error::InvalidWidth(width));
        }
        let mut buffer = [0u8; 6];
        buffer[0..2].copy_from_slice(&register.to_be_bytes());
        let value = value.to_be_bytes();
        let length = width as usize;
        buffer[2..2 + length].copy_from_slice(&value[4 - length..]);
        self.bus
            .write(self.address, &buffer[0..2 + length])
            .map_err(|error| Error::Transport(error.kind()))
    }

    pub fn read(&mut self, register: u16, width: u8) -> Result<u32, Error> {
        if width == 0 || width > 4 {
            return Err(Error::InvalidWidth(width));
        }
        let mut value = [0u8; 4];
        let length = width as usize;
        self.bus
            .write_read(
                self.address,
                &register.to_be_bytes(),
                &mut value[4 - length..],
            )
            .map_err(|error| Error::Transport(error.kind()))?;
        Ok(u32::from_be_bytes(value))
    }
}
