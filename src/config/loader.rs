#![warn(clippy::all, clippy::pedantic)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::Config;

// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "AIPUZZLE_CONFIG";

// Fallback config file path when no user config directory exists
const CONFIG_FILE_PATH: &str = "config/aipuzzle.toml";

// Load the configuration from the default location
pub fn load_config_from_file() -> Result<Config, ConfigError> {
    load_config_from_path(&get_config_file_path())
}

/// Reads `path`, creating it with defaults when it does not exist yet.
pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        let default_config = Config::default();
        save_config_to_path(&default_config, path)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn save_config_to_path(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)?;
    Ok(())
}

// Get the path to the config file
#[must_use]
pub fn get_config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("aipuzzle").join("config.toml")
    } else {
        PathBuf::from(CONFIG_FILE_PATH)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
