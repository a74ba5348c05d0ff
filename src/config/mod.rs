//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::{Calendar, DEFAULT_UTC_OFFSET_HOURS, DEFAULT_WINDOW_DAYS};
use crate::storage::StorageConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Statistics window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Fixed UTC offset of the deployment calendar, in hours
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,

    /// Look-back used when no start date is given
    #[serde(default = "default_window_days")]
    pub default_window_days: u32,
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

/// Upper bound for `default_window_days` (about ten years).
const MAX_WINDOW_DAYS: u32 = 3660;

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
            default_window_days: default_window_days(),
        }
    }
}

impl StatsConfig {
    pub fn calendar(&self) -> Result<Calendar, ConfigError> {
        Calendar::from_hours(self.utc_offset_hours, self.default_window_days).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "UTC offset out of range: {}",
                self.utc_offset_hours
            ))
        })
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub stats: StatsConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            stats: StatsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-12..=14).contains(&self.stats.utc_offset_hours) {
            return Err(ConfigError::ValidationError(format!(
                "utc_offset_hours must be between -12 and 14, got {}",
                self.stats.utc_offset_hours
            )));
        }

        if self.stats.default_window_days > MAX_WINDOW_DAYS {
            return Err(ConfigError::ValidationError(format!(
                "default_window_days must be at most {}",
                MAX_WINDOW_DAYS
            )));
        }

        Ok(())
    }

    pub fn storage(&self) -> StorageConfig {
        StorageConfig::new(self.data_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.stats.utc_offset_hours, 9);
        assert_eq!(config.stats.default_window_days, 7);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.stats.calendar().is_ok());
    }

    #[test]
    fn test_config_validation_bad_offset() {
        let mut config = AppConfig::default();
        config.stats.utc_offset_hours = 15;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_window() {
        let mut config = AppConfig::default();
        config.stats.default_window_days = 100_000;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/srv/battles\"\n[stats]\nutc_offset_hours = 0\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/battles"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.stats.utc_offset_hours, 0);
        assert_eq!(config.stats.default_window_days, 7);
        assert_eq!(config.storage().battles_path(), PathBuf::from("/srv/battles/battles.jsonl"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[stats]\nutc_offset_hours = \"nine\"\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.stats.default_window_days, parsed.stats.default_window_days);
    }
}
