use core::fmt::Debug;
use std::path::Path;

/// Configuration IO error.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Invalid format.
    #[error("Config error => Invalid format: {0}")]
    InvalidFormat(String),

    /// File not found.
    #[error("Config error => File not found: {0}")]
    FileNotFound(String),

    /// The configuration could not be written.
    #[error("Config error => Could not write: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration trait, implemented by the view configs.
///
/// Configs are stored as pretty printed JSON.
pub trait Config: Debug + serde::Serialize + serde::de::DeserializeOwned {
    /// Saves the configuration to a file.
    fn save<P: AsRef<Path>>(&self, file: P) -> Result<(), ConfigError> {
        std::fs::write(file, self.to_json()?)?;
        Ok(())
    }

    /// Loads the configuration from a file.
    fn load<P: AsRef<Path>>(file: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(file.as_ref())
            .map_err(|_| ConfigError::FileNotFound(file.as_ref().to_string_lossy().to_string()))?;
        config_from_str(&content)
    }

    /// Loads the configuration from a binary buffer.
    fn load_binary(data: &[u8]) -> Result<Self, ConfigError> {
        let content = core::str::from_utf8(data).map_err(|_| {
            ConfigError::InvalidFormat("Could not parse data as utf-8.".to_string())
        })?;
        config_from_str(content)
    }

    /// Converts the configuration to a JSON string.
    fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::InvalidFormat(format!("{err}")))
    }
}

fn config_from_str<C: Config>(content: &str) -> Result<C, ConfigError> {
    serde_json::from_str(content).map_err(|err| ConfigError::InvalidFormat(format!("{err}")))
}
