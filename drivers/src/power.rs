use embedded_hal::digital::Error as _;

pub const SUPPLY_NAMES: [&str; 3] = ["avdd", "dovdd", "dvdd"];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ResourceError(pub String);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("failed to enable the external clock ({0})")]
    Clock(ResourceError),

    #[error("failed to enable the regulators ({0})")]
    Regulators(ResourceError),
}

pub trait Clock: Send {
    fn set_rate(&mut self, hz: u32) -> Result<(), ResourceError>;

    fn rate(&self) -> u32;

    fn prepare_enable(&mut self) -> Result<(), ResourceError>;

    fn disable_unprepare(&mut self);
}

pub trait ResetLine: Send {
    fn set_value(&mut self, high: bool) -> Result<(), ResourceError>;
}

impl<Pin> ResetLine for Pin
where
    Pin: embedded_hal::digital::OutputPin + Send,
{
    fn set_value(&mut self, high: bool) -> Result<(), ResourceError> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
        .map_err(|error| ResourceError(format!("{:?}", error.kind())))
    }
}

pub trait Regulators: Send {
    fn enable(&mut self, supplies: &[&'static str]) -> Result<(), ResourceError>;

    fn disable(&mut self, supplies: &[&'static str]);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinState {
    Default,
    Sleep,
}

impl PinState {
    pub fn name(self) -> &'static str {
        match self {
            PinState::Default => "rockchip,camera_default",
            PinState::Sleep => "rockchip,camera_sleep",
        }
    }
}

pub trait Pinctrl: Send {
    fn select_state(&mut self, state: PinState) -> Result<(), ResourceError>;
}

/// Host handles acquired once at attach.
pub struct Resources {
    pub clock: Box<dyn Clock>,
    pub reset: Option<Box<dyn ResetLine>>,
    pub regulators: Box<dyn Regulators>,
    pub pinctrl: Option<Box<dyn Pinctrl>>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timing {
    pub clock_hz: u32,
    pub settle_us: u32,
    pub settle_without_reset_us: u32,

    /// Clock cycles the sensor needs after reset before its first bus transaction.
    pub power_up_cycles: Option<u32>,
}

pub const REGULATOR_RAMP_US: u32 = 5000;

impl Timing {
    pub fn power_up_delay_us(&self) -> Option<u32> {
        self.power_up_cycles
            .map(|cycles| cycles.div_ceil(self.clock_hz / 1_000_000))
    }
}

pub struct PowerSequencer {
    resources: Resources,
    timing: Timing,
    on: bool,
}

impl PowerSequencer {
    pub fn new(resources: Resources, timing: Timing) -> Self {
        Self {
            resources,
            timing,
            on: false,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn power_on<Delay>(&mut self, delay: &mut Delay) -> Result<(), Error>
    where
        Delay: embedded_hal::delay::DelayNs,
    {
        if let Some(pinctrl) = self.resources.pinctrl.as_mut() {
            if let Err(error) = pinctrl.select_state(PinState::Default) {
                log::warn!("could not select {} ({error})", PinState::Default.name());
            }
        }
        if let Err(error) = self.resources.clock.set_rate(self.timing.clock_hz) {
            log::warn!("failed to set the clock rate to {} Hz ({error})", self.timing.clock_hz);
        }
        let rate = self.resources.clock.rate();
        if rate != self.timing.clock_hz {
            log::warn!("clock rate is {rate} Hz instead of {} Hz", self.timing.clock_hz);
        }
        if let Err(error) = self.resources.clock.prepare_enable() {
            log::error!("failed to enable the external clock ({error})");
            return Err(Error::Clock(error));
        }
        self.set_reset(false);
        if let Err(error) = self.resources.regulators.enable(&SUPPLY_NAMES) {
            log::error!("failed to enable regulators ({error})");
            self.resources.clock.disable_unprepare();
            return Err(Error::Regulators(error));
        }
        delay.delay_us(REGULATOR_RAMP_US);
        self.set_reset(true);
        if self.resources.reset.is_some() {
            delay.delay_us(self.timing.settle_us);
        } else {
            delay.delay_us(self.timing.settle_without_reset_us);
        }
        if let Some(power_up_delay) = self.timing.power_up_delay_us() {
            delay.delay_us(power_up_delay);
        }
        self.on = true;
        Ok(())
    }

    pub fn power_off(&mut self) {
        self.resources.clock.disable_unprepare();
        self.set_reset(false);
        if let Some(pinctrl) = self.resources.pinctrl.as_mut() {
            if let Err(error) = pinctrl.select_state(PinState::Sleep) {
                log::debug!("could not select {} ({error})", PinState::Sleep.name());
            }
        }
        self.resources.regulators.disable(&SUPPLY_NAMES);
        self.on = false;
    }

    fn set_reset(&mut self, high: bool) {
        if let Some(reset) = self.resources.reset.as_mut() {
            if let Err(error) = reset.set_value(high) {
                log::warn!("failed to drive the reset line ({error})");
            }
        }
    }
}

/// Reference-counted power state, owned by the host power-management layer.
pub trait RuntimePower: Send {
    fn usage(&self) -> u32;

    fn increment(&mut self);

    fn decrement(&mut self);

    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    /// Called when the usage count reaches zero; returning false defers the suspend.
    fn should_suspend(&mut self) -> bool {
        true
    }
}

#[derive(Debug, Default)]
pub struct UsageCounter {
    usage: u32,
    active: bool,
}

impl RuntimePower for UsageCounter {
    fn usage(&self) -> u32 {
        self.usage
    }

    fn increment(&mut self) {
        self.usage += 1;
    }

    fn decrement(&mut self) {
        self.usage = self.usage.saturating_sub(1);
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

pub struct PowerDomain {
    sequencer: PowerSequencer,
    runtime: Box<dyn RuntimePower>,
}

impl PowerDomain {
    pub fn new(sequencer: PowerSequencer, runtime: Box<dyn RuntimePower>) -> Self {
        Self { sequencer, runtime }
    }

    pub fn is_active(&self) -> bool {
        self.runtime.is_active()
    }

    pub fn usage(&self) -> u32 {
        self.runtime.usage()
    }

    /// Takes a reference, powering the sensor on first if it is suspended.
    pub fn acquire<Delay>(&mut self, delay: &mut Delay) -> Result<PowerGuard<'_>, Error>
    where
        Delay: embedded_hal::delay::DelayNs,
    {
        self.runtime.increment();
        if !self.runtime.is_active() {
            if let Err(error) = self.sequencer.power_on(delay) {
                self.runtime.decrement();
                return Err(error);
            }
            self.runtime.set_active(true);
        }
        Ok(PowerGuard {
            domain: self,
            held: true,
        })
    }

    /// Takes a reference only if the sensor is active and already in use.
    pub fn acquire_if_in_use(&mut self) -> Option<PowerGuard<'_>> {
        if self.runtime.is_active() && self.runtime.usage() > 0 {
            self.runtime.increment();
            Some(PowerGuard {
                domain: self,
                held: true,
            })
        } else {
            None
        }
    }

    pub fn release(&mut self) {
        self.runtime.decrement();
        self.idle();
    }

    pub fn release_no_idle(&mut self) {
        self.runtime.decrement();
    }

    pub fn mark_active(&mut self) {
        self.runtime.set_active(true);
    }

    pub fn idle(&mut self) {
        if self.runtime.usage() == 0 && self.runtime.is_active() && self.runtime.should_suspend()
        {
            self.sequencer.power_off();
            self.runtime.set_active(false);
        }
    }

    pub fn shutdown(&mut self) {
        if self.runtime.is_active() {
            self.sequencer.power_off();
        }
        self.runtime.set_active(false);
    }
}

/// Releases its reference when dropped.
pub struct PowerGuard<'a> {
    domain: &'a mut PowerDomain,
    held: bool,
}

impl PowerGuard<'_> {
    /// Keeps the reference alive past the guard; `PowerDomain::release` returns it.
    pub fn keep(mut self) {
        self.held = false;
    }

    /// Returns the reference without letting the sensor suspend.
    pub fn discard(mut self) {
        self.held = false;
        self.domain.release_no_idle();
    }
}

impl Drop for PowerGuard<'_> {
    fn drop(&mut self) {
        if self.held {
            self.domain.release();
        }
    }
}
