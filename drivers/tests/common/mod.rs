#![allow(dead_code)]

use omnivision_drivers::embedded_hal;
use omnivision_drivers::power;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write { register: u16, data: Vec<u8> },
    Read { register: u16, length: usize },
    Delay { us: u32 },
    ClockSetRate(u32),
    ClockEnable,
    ClockDisable,
    Reset(bool),
    RegulatorsEnable(Vec<&'static str>),
    RegulatorsDisable,
    Pinctrl(power::PinState),
}

pub type Log = std::sync::Arc<std::sync::Mutex<Vec<Event>>>;

#[derive(Default)]
pub struct Faults {
    pub registers: std::collections::HashSet<u16>,
    pub clock: bool,
    pub regulators: bool,
}

#[derive(Clone)]
pub struct Harness {
    log: Log,
    memory: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<u16, u8>>>,
    faults: std::sync::Arc<std::sync::Mutex<Faults>>,
}

pub const ADDRESS: u8 = 0x36;

impl Harness {
    pub fn new() -> Self {
        Self {
            log: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
            memory: std::sync::Arc::new(std::sync::Mutex::new(std::collections::HashMap::new())),
            faults: std::sync::Arc::new(std::sync::Mutex::new(Faults::default())),
        }
    }

    /// A harness whose register file answers the chip ID of `sensor`.
    pub fn for_sensor(sensor: omnivision_drivers::Type) -> Self {
        let harness = Self::new();
        let chip_id = sensor.properties().chip_id;
        let bytes = chip_id.expected.to_be_bytes();
        harness.set_registers(chip_id.register, &bytes[4 - chip_id.width as usize..]);
        harness
    }

    pub fn set_registers(&self, register: u16, bytes: &[u8]) {
        let mut memory = self.memory.lock().unwrap();
        for (offset, byte) in bytes.iter().enumerate() {
            memory.insert(register + offset as u16, *byte);
        }
    }

    pub fn register(&self, register: u16) -> u8 {
        *self.memory.lock().unwrap().get(&register).unwrap_or(&0)
    }

    pub fn fail_register(&self, register: u16) {
        self.faults.lock().unwrap().registers.insert(register);
    }

    pub fn fail_clock(&self) {
        self.faults.lock().unwrap().clock = true;
    }

    pub fn fail_regulators(&self) {
        self.faults.lock().unwrap().regulators = true;
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }

    pub fn writes(&self) -> Vec<(u16, Vec<u8>)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Write { register, data } => Some((register, data)),
                _ => None,
            })
            .collect()
    }

    pub fn bus(&self) -> Bus {
        Bus {
            harness: self.clone(),
        }
    }

    pub fn delay(&self) -> Delay {
        Delay {
            log: self.log.clone(),
        }
    }

    pub fn transport(&self) -> omnivision_drivers::Transport<Bus> {
        omnivision_drivers::Transport::new(self.bus(), ADDRESS)
    }

    pub fn resources(&self, with_reset: bool) -> power::Resources {
        power::Resources {
            clock: Box::new(Clock {
                harness: self.clone(),
                rate: 0,
            }),
            reset: if with_reset {
                Some(Box::new(ResetPin {
                    log: self.log.clone(),
                }))
            } else {
                None
            },
            regulators: Box::new(Regulators {
                harness: self.clone(),
            }),
            pinctrl: Some(Box::new(Pinctrl {
                log: self.log.clone(),
            })),
        }
    }

    pub fn sequencer(
        &self,
        sensor: omnivision_drivers::Type,
        with_reset: bool,
    ) -> power::PowerSequencer {
        power::PowerSequencer::new(self.resources(with_reset), sensor.properties().timing)
    }

    pub fn attach(
        &self,
        sensor: omnivision_drivers::Type,
    ) -> Result<omnivision_drivers::SensorDriver<Bus, Delay>, omnivision_drivers::Error> {
        omnivision_drivers::SensorDriver::attach(
            sensor,
            identity(),
            self.transport(),
            self.delay(),
            self.resources(true),
            Box::<power::UsageCounter>::default(),
        )
    }

    fn push(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }
}

pub fn identity() -> omnivision_drivers::Identity {
    omnivision_drivers::Identity {
        module_index: 0,
        facing: "back".to_owned(),
        module_name: "CMK-OT1607-FV1".to_owned(),
        lens_name: "M12-40IRC-4MP-F16".to_owned(),
    }
}

pub struct Bus {
    harness: Harness,
}

impl embedded_hal::i2c::ErrorType for Bus {
    type Error = embedded_hal::i2c::ErrorKind;
}

impl embedded_hal::i2c::I2c for Bus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [embedded_hal::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        assert_eq!(address, ADDRESS);
        let mut register = 0u16;
        for operation in operations {
            match operation {
                embedded_hal::i2c::Operation::Write(bytes) => {
                    register = u16::from_be_bytes([bytes[0], bytes[1]]);
                    if bytes.len() > 2 {
                        self.harness.push(Event::Write {
                            register,
                            data: bytes[2..].to_vec(),
                        });
                        if self.harness.faults.lock().unwrap().registers.contains(&register) {
                            return Err(embedded_hal::i2c::ErrorKind::Other);
                        }
                        self.harness.set_registers(register, &bytes[2..]);
                    }
                }
                embedded_hal::i2c::Operation::Read(buffer) => {
                    self.harness.push(Event::Read {
                        register,
                        length: buffer.len(),
                    });
                    if self.harness.faults.lock().unwrap().registers.contains(&register) {
                        return Err(embedded_hal::i2c::ErrorKind::Other);
                    }
                    for (offset, byte) in buffer.iter_mut().enumerate() {
                        *byte = self.harness.register(register + offset as u16);
                    }
                }
            }
        }
        Ok(())
    }
}

pub struct Delay {
    log: Log,
}

impl embedded_hal::delay::DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.lock().unwrap().push(Event::Delay { us: ns / 1000 });
    }

    fn delay_us(&mut self, us: u32) {
        self.log.lock().unwrap().push(Event::Delay { us });
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.lock().unwrap().push(Event::Delay { us: ms * 1000 });
    }
}

struct Clock {
    harness: Harness,
    rate: u32,
}

impl power::Clock for Clock {
    fn set_rate(&mut self, hz: u32) -> Result<(), power::ResourceError> {
        self.harness.push(Event::ClockSetRate(hz));
        self.rate = hz;
        Ok(())
    }

    fn rate(&self) -> u32 {
        self.rate
    }

    fn prepare_enable(&mut self) -> Result<(), power::ResourceError> {
        if self.harness.faults.lock().unwrap().clock {
            return Err(power::ResourceError("xvclk".to_owned()));
        }
        self.harness.push(Event::ClockEnable);
        Ok(())
    }

    fn disable_unprepare(&mut self) {
        self.harness.push(Event::ClockDisable);
    }
}

struct ResetPin {
    log: Log,
}

impl embedded_hal::digital::ErrorType for ResetPin {
    type Error = std::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for ResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.lock().unwrap().push(Event::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.lock().unwrap().push(Event::Reset(true));
        Ok(())
    }
}

struct Regulators {
    harness: Harness,
}

impl power::Regulators for Regulators {
    fn enable(&mut self, supplies: &[&'static str]) -> Result<(), power::ResourceError> {
        if self.harness.faults.lock().unwrap().regulators {
            return Err(power::ResourceError("dvdd".to_owned()));
        }
        self.harness.push(Event::RegulatorsEnable(supplies.to_vec()));
        Ok(())
    }

    fn disable(&mut self, _supplies: &[&'static str]) {
        self.harness.push(Event::RegulatorsDisable);
    }
}

struct Pinctrl {
    log: Log,
}

impl power::Pinctrl for Pinctrl {
    fn select_state(&mut self, state: power::PinState) -> Result<(), power::ResourceError> {
        self.log.lock().unwrap().push(Event::Pinctrl(state));
        Ok(())
    }
}

pub fn power_on_events(sensor: omnivision_drivers::Type) -> Vec<Event> {
    let timing = sensor.properties().timing;
    let mut events = vec![
        Event::Pinctrl(power::PinState::Default),
        Event::ClockSetRate(timing.clock_hz),
        Event::ClockEnable,
        Event::Reset(false),
        Event::RegulatorsEnable(power::SUPPLY_NAMES.to_vec()),
        Event::Delay { us: 5000 },
        Event::Reset(true),
        Event::Delay {
            us: timing.settle_us,
        },
    ];
    if let Some(us) = timing.power_up_delay_us() {
        events.push(Event::Delay { us });
    }
    events
}

pub fn power_off_events() -> Vec<Event> {
    vec![
        Event::ClockDisable,
        Event::Reset(false),
        Event::Pinctrl(power::PinState::Sleep),
        Event::RegulatorsDisable,
    ]
}
