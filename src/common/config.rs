//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Path of the action catalog file
    #[serde(default = "default_actions_file")]
    pub actions_file: PathBuf,

    /// Directory for per-scenario result artifacts
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            actions_file: default_actions_file(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_actions_file() -> PathBuf {
    paths::default_actions_file()
}

fn default_log_dir() -> PathBuf {
    paths::default_log_dir()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
                path: path.display().to_string(),
                error: e.to_string(),
            })?;
        toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}
