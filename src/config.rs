//! Configuration file support for emotive.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/emotive/config.toml`
//! - macOS: `~/Library/Application Support/emotive/config.toml`
//! - Windows: `%APPDATA%\emotive\config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use em_master::EngineSettings;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mix levels, block size and seed for live and offline sessions
    pub engine: EngineSettings,
    /// Defaults for the `render` subcommand
    pub render: RenderSettings,
}

/// Offline render defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub sample_rate: u32,
    pub seconds: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { sample_rate: 44100, seconds: 30.0 }
    }
}

impl Config {
    /// Load from `path` if given (it must exist), otherwise from the default
    /// location if a file is there, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::config_path() {
                Ok(path) if path.exists() => Self::from_file(&path),
                _ => {
                    log::debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "emotive")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| anyhow!("could not determine config directory"))
    }

    /// Write the defaults to the default location, returning its path.
    pub fn create_default_config_file() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&Self::default())?;
        fs::write(&path, content)?;
        Ok(path)
    }
}
