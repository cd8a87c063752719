//! Configuration loading for lustred.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.lustre/config.toml` (user)
//! 3. `/etc/lustre/config.toml` (system)
//! 4. Built-in defaults
//!
//! Artifact paths are resolved relative to the working directory.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{LustreError, Result};

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000).
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            limits: LimitsConfig::default(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:5000".to_string()
}

/// Resource limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted request body in bytes (default: 16384).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_max_body_bytes() -> usize {
    16 * 1024
}

/// Locations of the pre-fitted artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Scaler artifact (default: `scaler.json`).
    #[serde(default = "default_scaler_path")]
    pub scaler: PathBuf,
    /// Regressor artifact (default: `model.json`).
    #[serde(default = "default_model_path")]
    pub model: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            scaler: default_scaler_path(),
            model: default_model_path(),
        }
    }
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from("scaler.json")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.json")
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; must exist)
    /// 2. `~/.lustre/config.toml`
    /// 3. `/etc/lustre/config.toml`
    /// 4. Defaults, when no file is found
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            LustreError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            LustreError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path, if any.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(LustreError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".lustre").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/lustre/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}
