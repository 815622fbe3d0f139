//! Persisted user preferences for the tracker shell.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::pay_cycle::DEFAULT_CYCLE_DAYS,
    utils::{app_data_dir, config_file_in, data_dir_in, ensure_dir, write_file_atomically},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Stores user-configurable preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<Uuid>,
    #[serde(default = "Config::default_cycle_days_value")]
    pub default_cycle_days: u32,
    /// Optional custom directory for the record store. Defaults to `<home>/data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_user: None,
            default_cycle_days: Self::default_cycle_days_value(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_cycle_days_value() -> u32 {
        DEFAULT_CYCLE_DAYS
    }

    pub fn currency_symbol(&self) -> &str {
        match self.currency.to_ascii_uppercase().as_str() {
            "USD" | "AUD" | "CAD" | "NZD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" => "¥",
            _ => "",
        }
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| data_dir_in(base))
    }
}

/// Handles loading and saving [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        let config_path = config_file_in(&base);
        Ok(Self { base, config_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_file_atomically(&self.config_path, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_cycle_days, 14);
    }

    #[test]
    fn save_then_load_preserves_user() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.default_user = Some(Uuid::new_v4());
        config.currency = "EUR".into();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.currency_symbol(), "€");
        assert!(!manager.config_path().with_extension("json.tmp").exists());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::create_dir_all(manager.config_path().parent().unwrap()).unwrap();
        fs::write(
            manager.config_path(),
            r#"{ "currency": "NZD" }"#,
        )
        .unwrap();
        let loaded = manager.load().unwrap();
        assert!(loaded.ui_color_enabled);
        assert_eq!(loaded.default_cycle_days, 14);
        assert_eq!(
            loaded.resolve_data_dir(dir.path()),
            dir.path().join("data")
        );
    }
}
