//! Configuration module
//!
//! Read from a TOML file (default `~/.config/oceanwatch/config.toml`).
//! Every section and key is optional; anything left out falls back to
//! the defaults below.
//!
//! ```toml
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! format = "pretty"   # pretty | json
//!
//! [presence]
//! enabled = true
//! interval_secs = 10
//! online_threshold = 0.7
//! # seed = 42
//!
//! [shutdown]
//! timeout_secs = 5
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::presence::DEFAULT_ONLINE_THRESHOLD;
use crate::shared::ConfigError;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "OCEANWATCH_CONFIG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub presence: PresenceConfig,
    pub shutdown: ShutdownConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Demo-mode presence simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Start with demo mode on
    pub enabled: bool,
    /// Seconds between presence redraws
    pub interval_secs: u64,
    /// A record is online when a uniform draw in [0, 1) exceeds this
    pub online_threshold: f64,
    /// Fixed RNG seed for reproducible demos
    pub seed: Option<u64>,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 10,
            online_threshold: DEFAULT_ONLINE_THRESHOLD,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    pub timeout_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "logging.level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.logging.level
            )));
        }
        if !matches!(self.logging.format.to_lowercase().as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }
        if self.presence.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "presence.interval_secs must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.presence.online_threshold) {
            return Err(ConfigError::Invalid(format!(
                "presence.online_threshold must be within 0.0..=1.0, got {}",
                self.presence.online_threshold
            )));
        }
        Ok(())
    }
}

/// `$OCEANWATCH_CONFIG`, else `<config dir>/oceanwatch/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("oceanwatch")
        .join("config.toml")
}
