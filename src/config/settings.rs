//! Application configuration loading from config.toml
//!
//! Settings are read from a TOML file (default `./config.toml`, or the path in
//! `CONFIG_PATH`). A missing file is not an error: every setting has a default.
//! `DATABASE_URL` in the environment overrides the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/debt_ledger.sqlite?mode=rwc";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Connection string handed to `SeaORM`
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Payment reminder job settings
    #[serde(default)]
    pub reminders: ReminderConfig,
}

/// Settings for the periodic payment reminder job
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ReminderConfig {
    /// Whether the binary runs the reminder loop at all
    pub enabled: bool,
    /// Seconds between two reminder runs
    pub interval_secs: u64,
    /// Payments due within this many days get a reminder
    pub lead_days: i64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 3600,
            lead_days: 3,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            reminders: ReminderConfig::default(),
        }
    }
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the application configuration the binary runs with.
///
/// Reads `CONFIG_PATH` (default `config.toml`), falls back to defaults when the
/// file does not exist, then applies the `DATABASE_URL` override.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

    let mut config = if Path::new(&path).exists() {
        debug!("Loading configuration from {}", path);
        load_config(&path)?
    } else {
        info!("No configuration file at {}, using defaults", path);
        AppConfig::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }

    if config.reminders.interval_secs == 0 {
        return Err(Error::Config {
            message: "reminders.interval_secs must be greater than zero".to_string(),
        });
    }

    Ok(config)
}
