//! # App Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_DATA_DIR=/srv/stockroom                                  │
//! │     STOCKROOM_EXPORT_DIR=~/Downloads                                   │
//! │     STOCKROOM_LANG=en                                                  │
//! │     STOCKROOM_HISTORY_PAGE_SIZE=25                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/stockroom/stockroom.toml (Linux)                         │
//! │     ~/Library/Application Support/com.stockroom.stockroom/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! data_dir = "/home/me/.local/share/stockroom"
//! export_dir = "/home/me/Downloads"
//! language = "he"          # optional; saved choice still wins
//! history_page_size = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use stockroom_core::{Language, DEFAULT_HISTORY_PAGE_SIZE};

/// Errors loading or saving the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse failed: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize failed: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration. Read-only after startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the storage keys live, one `<key>.json` file each.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Where exported CSV / spreadsheet files are written.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Language to use when none has been saved yet.
    #[serde(default)]
    pub language: Option<Language>,

    /// Rows per history page.
    #[serde(default = "default_history_page_size")]
    pub history_page_size: usize,
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "stockroom", "stockroom")
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./stockroom_data"))
}

fn default_export_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("./exports"))
}

fn default_history_page_size() -> usize {
    DEFAULT_HISTORY_PAGE_SIZE
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            export_dir: default_export_dir(),
            language: None,
            history_page_size: default_history_page_size(),
        }
    }
}

impl AppConfig {
    /// Loads config: defaults, then the TOML file, then the environment.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the config as TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Invalid("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.history_page_size == 0 {
            return Err(ConfigError::Invalid(
                "history_page_size must be greater than 0".into(),
            ));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }
        Ok(())
    }

    /// Applies `STOCKROOM_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("STOCKROOM_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup("STOCKROOM_EXPORT_DIR") {
            debug!(export_dir = %dir, "Overriding export dir from environment");
            self.export_dir = PathBuf::from(dir);
        }

        if let Some(lang) = lookup("STOCKROOM_LANG") {
            match lang.parse::<Language>() {
                Ok(language) => self.language = Some(language),
                Err(e) => warn!("Ignoring STOCKROOM_LANG: {}", e),
            }
        }

        if let Some(size) = lookup("STOCKROOM_HISTORY_PAGE_SIZE") {
            match size.parse::<usize>() {
                Ok(size) => self.history_page_size = size,
                Err(_) => warn!(value = %size, "Ignoring STOCKROOM_HISTORY_PAGE_SIZE"),
            }
        }
    }

    /// `stockroom.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("stockroom.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.history_page_size, 10);
        assert_eq!(config.language, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.history_page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("STOCKROOM_DATA_DIR", "/tmp/stock"),
            ("STOCKROOM_LANG", "en"),
            ("STOCKROOM_HISTORY_PAGE_SIZE", "nope"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/stock"));
        assert_eq!(config.language, Some(Language::En));
        assert_eq!(config.history_page_size, 10);
    }

    #[test]
    fn test_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf/stockroom.toml");

        let config = AppConfig {
            data_dir: temp.path().join("data"),
            export_dir: temp.path().join("out"),
            language: Some(Language::He),
            history_page_size: 25,
        };
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("history_page_size = 25"));
        assert!(contents.contains("language = \"he\""));

        let loaded: AppConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: AppConfig = toml::from_str("history_page_size = 5").unwrap();
        assert_eq!(loaded.history_page_size, 5);
        assert_eq!(loaded.data_dir, default_data_dir());
    }
}
