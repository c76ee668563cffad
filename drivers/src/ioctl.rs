use omnivision_types as types;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub sensor: String,
    pub module: String,
    pub lens: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HdrConfig {
    pub esp_mode: types::EspMode,
    pub hdr_mode: types::HdrMode,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct HdrAeExposure {
    pub long_exposure: u32,
    pub long_gain: u32,
    pub middle_exposure: u32,
    pub middle_gain: u32,
    pub short_exposure: u32,
    pub short_gain: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    GetModuleInfo,
    GetHdrConfig,
    SetHdrConfig(types::HdrMode),
    SetHdrAeExposure(HdrAeExposure),
    SetQuickStream(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    ModuleInfo(ModuleInfo),
    HdrConfig(HdrConfig),
    Done,
}
