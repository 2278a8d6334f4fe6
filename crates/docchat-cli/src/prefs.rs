//! Display preferences persisted between runs.
//!
//! Presentation-only state (the light/dark theme toggle) lives in
//! `~/.config/docchat/state.toml`, separate from the backend configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use docchat_core::error::{DocChatError, Result};

/// Terminal color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// User preferences for the CLI.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

impl Preferences {
    /// Loads preferences from the default location, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        prefs_path()
            .filter(|path| path.exists())
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Loads preferences from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| DocChatError::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        })
    }

    /// Saves preferences to the default location.
    pub fn save(&self) -> Result<()> {
        let path = prefs_path()
            .ok_or_else(|| DocChatError::config("Could not determine home directory"))?;
        self.save_to(&path)
    }

    /// Saves preferences to an explicit TOML file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|err| DocChatError::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        })?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Returns the path to the preferences file: ~/.config/docchat/state.toml
fn prefs_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("docchat").join("state.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");

        let prefs = Preferences { theme: Theme::Dark };
        prefs.save_to(&path).unwrap();

        let loaded = Preferences::load_from(&path).unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "").unwrap();

        let loaded = Preferences::load_from(&path).unwrap();
        assert_eq!(loaded.theme, Theme::Light);
    }
}
