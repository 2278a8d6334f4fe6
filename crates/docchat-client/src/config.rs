//! Backend endpoint configuration.
//!
//! Reads `~/.config/docchat/config.toml` when present; the `DOCCHAT_BASE_URL`
//! and `DOCCHAT_TIMEOUT_SECS` environment variables override the file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use docchat_core::error::{DocChatError, Result};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the docchat backend lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Loads configuration with the standard precedence:
    /// environment variables, then the config file, then built-in defaults.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Loads configuration from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            DocChatError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                err
            ))
        })?;
        toml::from_str(&content).map_err(|err| {
            DocChatError::config(format!(
                "Failed to parse configuration file at {}: {}",
                path.display(),
                err
            ))
        })
    }

    fn apply_env(&mut self) {
        if let Ok(base_url) = env::var("DOCCHAT_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.base_url = base_url;
            }
        }
        if let Ok(timeout) = env::var("DOCCHAT_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.timeout_secs = secs;
            }
        }
    }
}

/// Returns the path to the configuration file: ~/.config/docchat/config.toml
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("docchat").join("config.toml"))
}
