use crate::configuration;
use crate::controls;
use crate::devices;
use crate::error::Error;
use crate::ioctl;
use crate::modes;
use crate::power;
use crate::properties;
use crate::registers;
use crate::transport;
use omnivision_types as types;

struct State<I2C, Delay> {
    properties: &'static properties::SensorConfig,
    transport: transport::Transport<I2C>,
    delay: Delay,
    power: power::PowerDomain,
    controls: controls::Controls,
    mode: &'static modes::SupportedMode,
    streaming: bool,
    power_on: bool,
    frame_interval: types::Fraction,
}

/// Trial format owned by one client of the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    format: types::FrameFormat,
}

impl Client {
    pub fn format(&self) -> &types::FrameFormat {
        &self.format
    }
}

pub struct SensorDriver<I2C, Delay> {
    sensor: devices::Type,
    identity: configuration::Identity,
    name: String,
    trial_formats: bool,
    state: std::sync::Mutex<State<I2C, Delay>>,
}

fn colorspace(properties: &properties::SensorConfig) -> types::Colorspace {
    if properties.raw_colorspace {
        types::Colorspace::Raw
    } else {
        types::Colorspace::Default
    }
}

fn check_sensor_id<I2C>(
    transport: &mut transport::Transport<I2C>,
    properties: &properties::SensorConfig,
) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let chip_id = properties.chip_id;
    let found = transport.read(chip_id.register, chip_id.width)?;
    if found != chip_id.expected {
        log::error!("unexpected sensor id 0x{found:06x}");
        return Err(Error::UnexpectedId {
            found,
            expected: chip_id.expected,
        });
    }
    match properties.version_register {
        Some(register) => match transport.read(register, transport::VALUE_08BIT) {
            Ok(version) => log::info!("detected {} sensor (version 0x{version:02x})", properties.name),
            Err(error) => log::info!("detected {} sensor (version unavailable: {error})", properties.name),
        },
        None => log::info!("detected {} sensor", properties.name),
    }
    Ok(())
}

/// Narrows the exposure range after a vertical blanking change.
fn propagate_vblank(
    controls: &mut controls::Controls,
    properties: &properties::SensorConfig,
    mode: &modes::SupportedMode,
    vblank: i64,
) -> Result<Option<i64>, controls::Error> {
    let exposure = match controls.get(controls::ControlId::Exposure) {
        Some(exposure) => exposure,
        None => return Ok(None),
    };
    let range = properties::Range {
        minimum: exposure.minimum,
        maximum: mode.height as i64 + vblank - properties.exposure_limits.guard_band as i64,
        step: exposure.step,
        default: exposure.default,
    };
    controls.modify_range(controls::ControlId::Exposure, range)
}

fn program_stream<I2C, Delay>(
    transport: &mut transport::Transport<I2C>,
    delay: &mut Delay,
    controls: &mut controls::Controls,
    properties: &properties::SensorConfig,
    mode: &modes::SupportedMode,
) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
    Delay: embedded_hal::delay::DelayNs,
{
    registers::apply(transport, delay, mode.registers, properties.delay_unit)?;
    for (id, value) in controls.writable() {
        if id == controls::ControlId::VerticalBlanking {
            propagate_vblank(controls, properties, mode, value)?;
        }
        let value = controls.value(id).unwrap_or(value);
        controls::write(transport, properties, mode, id, value)?;
    }
    transport.write(
        properties.control_mode_register,
        transport::VALUE_08BIT,
        properties::MODE_STREAMING,
    )?;
    Ok(())
}

impl<I2C, Delay> State<I2C, Delay>
where
    I2C: embedded_hal::i2c::I2c,
    Delay: embedded_hal::delay::DelayNs,
{
    fn apply_control(&mut self, id: controls::ControlId, value: i64) -> Result<(), Error> {
        if id == controls::ControlId::VerticalBlanking {
            if let Some(exposure) =
                propagate_vblank(&mut self.controls, self.properties, self.mode, value)?
            {
                self.apply_control(controls::ControlId::Exposure, exposure)?;
            }
        }
        let written = {
            let State {
                properties,
                transport,
                power,
                mode,
                ..
            } = &mut *self;
            match power.acquire_if_in_use() {
                Some(_guard) => controls::write(transport, *properties, *mode, id, value),
                None => Ok(()),
            }
        };
        if let Err(error) = written {
            if id == controls::ControlId::VerticalBlanking {
                // the stored vblank still bounds exposure
                if let Some(vblank) = self.controls.value(id) {
                    propagate_vblank(&mut self.controls, self.properties, self.mode, vblank)?;
                }
            }
            return Err(error.into());
        }
        Ok(())
    }

    fn commit_mode(&mut self, mode: &'static modes::SupportedMode) -> Result<(), Error> {
        self.mode = mode;
        let hblank = mode.hblank();
        self.controls.modify_range(
            controls::ControlId::HorizontalBlanking,
            properties::Range {
                minimum: hblank,
                maximum: hblank,
                step: 1,
                default: hblank,
            },
        )?;
        let vblank = mode.vblank_default();
        let moved = self.controls.modify_range(
            controls::ControlId::VerticalBlanking,
            properties::Range {
                minimum: vblank,
                maximum: self.properties.vts_max as i64 - mode.height as i64,
                step: 1,
                default: vblank,
            },
        )?;
        match moved {
            Some(vblank) => self.apply_control(controls::ControlId::VerticalBlanking, vblank),
            None => {
                let vblank = self
                    .controls
                    .value(controls::ControlId::VerticalBlanking)
                    .unwrap_or(vblank);
                if let Some(exposure) =
                    propagate_vblank(&mut self.controls, self.properties, self.mode, vblank)?
                {
                    self.apply_control(controls::ControlId::Exposure, exposure)?;
                }
                Ok(())
            }
        }
    }

    fn start_stream(&mut self) -> Result<(), Error> {
        let State {
            properties,
            transport,
            delay,
            power,
            controls,
            mode,
            streaming,
            ..
        } = self;
        let guard = power.acquire(delay)?;
        if let Err(error) = program_stream(transport, delay, controls, *properties, *mode) {
            log::error!("start stream failed while writing registers ({error})");
            drop(guard);
            return Err(error);
        }
        guard.keep();
        if let Some(settle) = properties.stream_settle_us {
            delay.delay_us(settle);
        }
        for register in properties.diagnostic_registers {
            match transport.read(*register, transport::VALUE_08BIT) {
                Ok(value) => log::info!("0x{register:04x}: 0x{value:02x}"),
                Err(error) => log::info!("0x{register:04x}: {error}"),
            }
        }
        *streaming = true;
        Ok(())
    }

    fn stop_stream(&mut self) {
        if let Err(error) = self.transport.write(
            self.properties.control_mode_register,
            transport::VALUE_08BIT,
            properties::MODE_SW_STANDBY,
        ) {
            log::warn!("failed to put the sensor in standby ({error})");
        }
        self.power.release();
        self.streaming = false;
    }
}

impl<I2C, Delay> SensorDriver<I2C, Delay>
where
    I2C: embedded_hal::i2c::I2c,
    Delay: embedded_hal::delay::DelayNs,
{
    pub fn attach(
        sensor: devices::Type,
        identity: configuration::Identity,
        mut transport: transport::Transport<I2C>,
        mut delay: Delay,
        resources: power::Resources,
        runtime: Box<dyn power::RuntimePower>,
    ) -> Result<Self, Error> {
        let properties = sensor.properties();
        let mode = properties.default_mode();
        let controls = controls::Controls::new(properties, mode);
        let mut sequencer = power::PowerSequencer::new(resources, properties.timing);
        sequencer.power_on(&mut delay)?;
        if let Err(error) = check_sensor_id(&mut transport, properties) {
            sequencer.power_off();
            return Err(error);
        }
        let mut power = power::PowerDomain::new(sequencer, runtime);
        power.mark_active();
        power.idle();
        let name = identity.subdev_name(
            properties.name,
            &format!("{:04x}", transport.address()),
        );
        log::info!("attached {name}");
        Ok(Self {
            sensor,
            identity,
            name,
            trial_formats: true,
            state: std::sync::Mutex::new(State {
                properties,
                transport,
                delay,
                power,
                controls,
                mode,
                streaming: false,
                power_on: false,
                frame_interval: mode.max_fps,
            }),
        })
    }

    pub fn detach(self) {
        log::info!("detaching {}", self.name);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State<I2C, Delay>> {
        // unwrap: mutex is not poisoned
        self.state.lock().unwrap()
    }

    pub fn sensor(&self) -> devices::Type {
        self.sensor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identity(&self) -> &configuration::Identity {
        &self.identity
    }

    pub fn set_trial_formats(&mut self, enabled: bool) {
        self.trial_formats = enabled;
    }

    pub fn is_streaming(&self) -> bool {
        self.lock().streaming
    }

    pub fn is_powered(&self) -> bool {
        self.lock().power.is_active()
    }

    pub fn power_usage(&self) -> u32 {
        self.lock().power.usage()
    }

    pub fn verify_identity(&self) -> Result<(), Error> {
        let mut state = self.lock();
        let State {
            properties,
            transport,
            delay,
            power,
            ..
        } = &mut *state;
        let _guard = power.acquire(delay)?;
        check_sensor_id(transport, *properties)
    }

    pub fn runtime_idle(&self) {
        self.lock().power.idle();
    }

    pub fn s_power(&self, on: bool) -> Result<(), Error> {
        let mut state = self.lock();
        if state.power_on == on {
            return Ok(());
        }
        if on {
            let State {
                properties,
                transport,
                delay,
                power,
                power_on,
                ..
            } = &mut *state;
            let guard = power.acquire(delay)?;
            if let Err(error) = registers::apply(
                transport,
                delay,
                properties.global_registers,
                properties.delay_unit,
            ) {
                log::error!("could not set init registers ({error})");
                guard.discard();
                return Err(error.into());
            }
            guard.keep();
            *power_on = true;
        } else {
            state.power.release();
            state.power_on = false;
        }
        Ok(())
    }

    pub fn s_stream(&self, on: bool) -> Result<(), Error> {
        let mut state = self.lock();
        if state.streaming == on {
            return Ok(());
        }
        if on {
            state.start_stream()
        } else {
            state.stop_stream();
            Ok(())
        }
    }

    pub fn open(&self) -> Client {
        let state = self.lock();
        Client {
            format: state
                .properties
                .default_mode()
                .format(colorspace(state.properties), 0),
        }
    }

    pub fn get_format(
        &self,
        client: &Client,
        which: types::Which,
        pad: usize,
    ) -> Result<types::FrameFormat, Error> {
        match which {
            types::Which::Try => {
                if self.trial_formats {
                    Ok(client.format)
                } else {
                    Err(Error::NotSupported)
                }
            }
            types::Which::Active => {
                let state = self.lock();
                Ok(state.mode.format(colorspace(state.properties), pad))
            }
        }
    }

    pub fn set_format(
        &self,
        client: &mut Client,
        which: types::Which,
        pad: usize,
        width: u32,
        height: u32,
    ) -> Result<types::FrameFormat, Error> {
        let mut state = self.lock();
        let mode = modes::find_best_fit(state.properties.modes, width, height);
        let format = mode.format(colorspace(state.properties), pad);
        match which {
            types::Which::Try => {
                if !self.trial_formats {
                    return Err(Error::NotSupported);
                }
                client.format = format;
            }
            types::Which::Active => {
                state.frame_interval = mode.max_fps;
                if let Err(error) = state.commit_mode(mode) {
                    log::warn!(
                        "blanking update for {}x{} failed ({error})",
                        mode.width,
                        mode.height
                    );
                }
            }
        }
        Ok(format)
    }

    pub fn enumerate_mbus_code(&self, index: u32) -> Result<types::MbusCode, Error> {
        if index != 0 {
            return Err(Error::OutOfRange { index, count: 1 });
        }
        Ok(self.lock().mode.code)
    }

    pub fn enumerate_frame_sizes(
        &self,
        index: u32,
        code: types::MbusCode,
    ) -> Result<types::FrameSize, Error> {
        let state = self.lock();
        let supported = state.properties.modes;
        let mode = supported.get(index as usize).ok_or(Error::OutOfRange {
            index,
            count: supported.len() as u32,
        })?;
        if code != state.properties.default_mode().code {
            return Err(Error::InvalidCode(code));
        }
        Ok(types::FrameSize {
            width: mode.width,
            height: mode.height,
        })
    }

    pub fn enumerate_frame_intervals(&self, index: u32) -> Result<types::FrameInterval, Error> {
        let state = self.lock();
        let supported = state.properties.modes;
        supported
            .get(index as usize)
            .map(modes::SupportedMode::frame_interval)
            .ok_or(Error::OutOfRange {
                index,
                count: supported.len() as u32,
            })
    }

    pub fn frame_interval(&self) -> types::Fraction {
        let state = self.lock();
        if state.streaming {
            state.frame_interval
        } else {
            state.mode.max_fps
        }
    }

    pub fn mbus_config(&self) -> types::MbusConfig {
        let state = self.lock();
        types::MbusConfig {
            bus_type: types::BusType::Csi2Dphy,
            lanes: state.properties.lanes,
            hdr_mode: state.mode.hdr_mode,
        }
    }

    pub fn control(&self, id: controls::ControlId) -> Option<controls::Control> {
        self.lock().controls.get(id).cloned()
    }

    pub fn controls(&self) -> Vec<controls::Control> {
        self.lock().controls.iter().cloned().collect()
    }

    /// Returns the value actually applied after range clamping.
    pub fn set_control(&self, id: controls::ControlId, value: i64) -> Result<i64, Error> {
        let mut state = self.lock();
        match state.controls.prepare(id, value)? {
            Some(value) => {
                state.apply_control(id, value)?;
                state.controls.store(id, value)?;
                Ok(value)
            }
            None => Ok(state.controls.value(id).unwrap_or(value)),
        }
    }

    pub fn command(&self, command: ioctl::Command) -> Result<ioctl::Response, Error> {
        let mut state = self.lock();
        match command {
            ioctl::Command::GetModuleInfo => Ok(ioctl::Response::ModuleInfo(ioctl::ModuleInfo {
                sensor: state.properties.name.to_owned(),
                module: self.identity.module_name.clone(),
                lens: self.identity.lens_name.clone(),
            })),
            ioctl::Command::GetHdrConfig => Ok(ioctl::Response::HdrConfig(ioctl::HdrConfig {
                esp_mode: types::EspMode::NormalVc,
                hdr_mode: state.mode.hdr_mode,
            })),
            ioctl::Command::SetHdrConfig(hdr_mode) => {
                let (width, height) = (state.mode.width, state.mode.height);
                match modes::find_hdr_mode(state.properties.modes, width, height, hdr_mode) {
                    Some(mode) => {
                        if let Err(error) = state.commit_mode(mode) {
                            log::warn!("blanking update for {hdr_mode:?} failed ({error})");
                        }
                        Ok(ioctl::Response::Done)
                    }
                    None => {
                        log::error!("no HDR mode {hdr_mode:?} for {width}x{height}");
                        Err(Error::HdrModeNotFound {
                            width,
                            height,
                            hdr_mode,
                        })
                    }
                }
            }
            ioctl::Command::SetHdrAeExposure(_) => Ok(ioctl::Response::Done),
            ioctl::Command::SetQuickStream(on) => {
                let register = state.properties.control_mode_register;
                state.transport.write(
                    register,
                    transport::VALUE_08BIT,
                    if on {
                        properties::MODE_STREAMING
                    } else {
                        properties::MODE_SW_STANDBY
                    },
                )?;
                Ok(ioctl::Response::Done)
            }
        }
    }
}

impl<I2C, Delay> Drop for SensorDriver<I2C, Delay> {
    fn drop(&mut self) {
        let state = match self.state.get_mut() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.power.shutdown();
    }
}
