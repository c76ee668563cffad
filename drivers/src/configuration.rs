use crate::error;

/// Module identification provided by the board description.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    pub module_index: u32,
    pub facing: String,
    pub module_name: String,
    pub lens_name: String,
}

impl Identity {
    pub fn from_toml(string: &str) -> Result<Self, error::Error> {
        toml::from_str(string).map_err(|error| error::Error::Configuration(error.to_string()))
    }

    pub fn deserialize_bincode(data: &[u8]) -> Result<Self, error::Error> {
        bincode::deserialize(data).map_err(|error| error::Error::Configuration(error.to_string()))
    }

    pub fn serialize_bincode(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn facing_code(&self) -> char {
        if self.facing == "back" {
            'b'
        } else {
            'f'
        }
    }

    pub fn subdev_name(&self, sensor: &str, device: &str) -> String {
        format!(
            "m{:02}_{}_{} {}",
            self.module_index,
            self.facing_code(),
            sensor,
            device
        )
    }
}
