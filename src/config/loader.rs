#![warn(clippy::all, clippy::pedantic)]

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::EngineConfig;

// Fallback config path relative to the working directory, used when no
// user config directory exists
const CONFIG_FILE_PATH: &str = "config/blockfall.toml";

// Load the configuration from the file system, creating a default config
// file on first use
pub fn load_config_from_file() -> Result<EngineConfig, ConfigError> {
    load_config_from_path(&config_file_path())
}

pub fn load_config_from_path(config_path: &Path) -> Result<EngineConfig, ConfigError> {
    if !config_path.exists() {
        let default_config = EngineConfig::default();
        save_config_to_path(&default_config, config_path)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(config_path)?;
    let config: EngineConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

// Save the configuration to the file system
pub fn save_config_to_file(config: &EngineConfig) -> Result<(), ConfigError> {
    save_config_to_path(config, &config_file_path())
}

pub fn save_config_to_path(config: &EngineConfig, config_path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(config_path, toml_string)?;
    Ok(())
}

// Get the path to the config file
fn config_file_path() -> PathBuf {
    // Check for environment variable override
    if let Ok(path) = std::env::var("BLOCKFALL_CONFIG") {
        return PathBuf::from(path);
    }

    // Otherwise use the default path in the user's config directory
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("blockfall").join("config.toml")
    } else {
        PathBuf::from(CONFIG_FILE_PATH)
    }
}

// Custom error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config io error: {err}"),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Serialize(err) => write!(f, "config serialize error: {err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Serialize(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
