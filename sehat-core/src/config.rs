//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/sehat/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/sehat/` (~/.config/sehat/)
//! - Data: `$XDG_DATA_HOME/sehat/` (~/.local/share/sehat/)
//! - State/Logs: `$XDG_STATE_HOME/sehat/` (~/.local/state/sehat/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Clinical threshold overrides
    #[serde(default)]
    pub clinical: ClinicalConfig,
}

/// Database configuration
#[derive(Debug, Deserialize, Default)]
pub struct DatabaseConfig {
    /// Override path for the SQLite database file
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Clinical thresholds that field programs tune per district
#[derive(Debug, Deserialize)]
pub struct ClinicalConfig {
    /// Days without an NCD checkup before a patient lands on the due list
    #[serde(default = "default_ncd_due_days")]
    pub ncd_due_days: i64,
}

impl Default for ClinicalConfig {
    fn default() -> Self {
        Self {
            ncd_due_days: default_ncd_due_days(),
        }
    }
}

fn default_ncd_due_days() -> i64 {
    30
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/sehat/config.toml` (~/.config/sehat/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("sehat").join("config.toml")
    }

    /// Returns the data directory path (for the SQLite database)
    ///
    /// `$XDG_DATA_HOME/sehat/` (~/.local/share/sehat/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("sehat")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/sehat/` (~/.local/state/sehat/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("sehat")
    }

    /// Returns the database file path, honoring the `[database] path` override
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("records.db"))
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/sehat/sehat.log` (~/.local/state/sehat/sehat.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("sehat.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database.path.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.clinical.ncd_due_days, 30);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[database]
path = "/var/lib/sehat/records.db"

[logging]
level = "debug"

[clinical]
ncd_due_days = 45
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(
            config.database.path.as_deref(),
            Some(std::path::Path::new("/var/lib/sehat/records.db"))
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.clinical.ncd_due_days, 45);
    }

    #[test]
    fn test_database_path_override() {
        let config: Config = toml::from_str("[database]\npath = \"/tmp/x.db\"\n").unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/x.db"));
    }
}
