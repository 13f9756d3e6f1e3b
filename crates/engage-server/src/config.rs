//! Server configuration
//!
//! Loaded from a TOML file named by `ENGAGE_CONFIG` (defaults otherwise),
//! with `ENGAGE_ADDR` overriding the bind address.

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use engage_heatmap::{offset_from_minutes, TimezoneMode};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "ENGAGE_CONFIG";
/// Environment variable overriding the bind address
pub const ADDR_ENV: &str = "ENGAGE_ADDR";

/// Top-level server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub addr: String,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Defaults applied when a request omits them
    pub heatmap: HeatmapDefaults,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
            log_filter: "info,tower_http=debug".to_string(),
            heatmap: HeatmapDefaults::default(),
        }
    }
}

/// Longest period a heatmap request may span, in whole days
pub const DEFAULT_MAX_PERIOD_DAYS: i64 = 366;

/// Heatmap request defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapDefaults {
    pub timezone: TimezoneMode,
    /// Viewer offset in minutes east of UTC
    pub utc_offset_minutes: i32,
    /// Requests spanning more days are rejected
    pub max_period_days: i64,
}

impl Default for HeatmapDefaults {
    fn default() -> Self {
        Self {
            timezone: TimezoneMode::Utc,
            utc_offset_minutes: 0,
            max_period_days: DEFAULT_MAX_PERIOD_DAYS,
        }
    }
}

/// Configuration loading or validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

impl ServerConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Load from `ENGAGE_CONFIG` if set, then apply `ENGAGE_ADDR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path))?,
            None => Self::default(),
        };
        if let Ok(addr) = std::env::var(ADDR_ENV) {
            config.addr = addr;
        }
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.addr.trim().is_empty() {
            return Err(ConfigError::Invalid("addr must not be empty".to_string()));
        }
        if self.heatmap.max_period_days < 1 {
            return Err(ConfigError::Invalid(
                "heatmap.max_period_days must be at least 1".to_string(),
            ));
        }
        self.default_offset()?;
        Ok(())
    }

    /// The configured viewer offset
    pub fn default_offset(&self) -> Result<FixedOffset, ConfigError> {
        offset_from_minutes(self.heatmap.utc_offset_minutes)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
