// dhcpcd-prefs - Application Configuration
// SPDX-License-Identifier: MIT

//! Application settings model.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::block::Category;
use super::error::{Error, Result};

/// Application settings, persisted as TOML under the XDG config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path of the dhcpcd configuration file the store edits.
    #[serde(default = "default_conf_path")]
    pub conf_path: PathBuf,

    /// Category the editor opens with.
    #[serde(default)]
    pub default_category: Category,
}

fn default_conf_path() -> PathBuf {
    PathBuf::from("/etc/dhcpcd.conf")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            conf_path: default_conf_path(),
            default_category: Category::default(),
        }
    }
}

impl AppConfig {
    /// Load the settings from the default location, if present.
    pub fn load() -> Option<Self> {
        let settings_file = dirs::config_dir()?
            .join(crate::CONFIG_DIR_NAME)
            .join("settings.toml");
        if settings_file.exists() {
            Self::load_from_file(&settings_file).ok()
        } else {
            None
        }
    }

    /// Load settings from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| Error::ConfigReadFailed(e.to_string()))?;
        Ok(toml::from_str(&content)?)
    }

    /// Save settings to a specific file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::ConfigWriteFailed(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::ConfigWriteFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.conf_path, PathBuf::from("/etc/dhcpcd.conf"));
        assert_eq!(config.default_category, Category::Interface);
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let config = AppConfig {
            conf_path: PathBuf::from("/tmp/dhcpcd.conf"),
            default_category: Category::Ssid,
        };
        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.conf_path, config.conf_path);
        assert_eq!(loaded.default_category, Category::Ssid);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.conf_path, PathBuf::from("/etc/dhcpcd.conf"));
    }
}
