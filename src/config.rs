use crate::tui::search::FilterMode;
use crate::users::fetch::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const KEYS: [&str; 3] = ["endpoint", "debounce_ms", "filter_mode"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub debounce_ms: u64,
    pub filter_mode: FilterMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: 300,
            filter_mode: FilterMode::default(),
        }
    }
}

impl Config {
    /// Loads the user's config file, falling back to defaults when none exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&get_config_file_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&get_config_file_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = toml::to_string(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "endpoint" => {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        reason: "endpoint cannot be empty".to_string(),
                    });
                }
                self.endpoint = value.to_string();
            }
            "debounce_ms" => {
                self.debounce_ms = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("'{}' is not a whole number of milliseconds", value),
                })?;
            }
            "filter_mode" => {
                self.filter_mode = value.parse().map_err(|reason| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason,
                })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "endpoint" => Ok(self.endpoint.clone()),
            "debounce_ms" => Ok(self.debounce_ms.to_string()),
            "filter_mode" => Ok(self.filter_mode.to_string()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

pub fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?;

    Ok(config_dir.join("userlist").join("config.toml"))
}

#[derive(Debug)]
pub enum ConfigError {
    ConfigDirNotFound,
    UnknownKey(String),
    InvalidValue { key: String, reason: String },
    ReadError(String),
    WriteError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigDirNotFound => {
                write!(f, "Could not find config directory")
            }
            ConfigError::UnknownKey(key) => {
                write!(f, "Unknown configuration key '{}'. Supported keys: {}", key, KEYS.join(", "))
            }
            ConfigError::InvalidValue { key, reason } => {
                write!(f, "Invalid value for '{}': {}", key, reason)
            }
            ConfigError::ReadError(msg) => {
                write!(f, "Failed to read config file: {}", msg)
            }
            ConfigError::WriteError(msg) => {
                write!(f, "Failed to write config file: {}", msg)
            }
            ConfigError::ParseError(msg) => {
                write!(f, "Failed to parse config file: {}", msg)
            }
            ConfigError::SerializeError(msg) => {
                write!(f, "Failed to serialize config: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
