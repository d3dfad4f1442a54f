//! Tool configuration
//!
//! Read from a JSON5 file so hand-edited configs may carry comments. Every
//! field has a default; an empty file yields `ToolsConfig::default()`.

use crate::error::{Result, TradeToolsError};
use crate::status::STALE_DATA_HOURS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TRACKER_BASE_URL: &str = "https://ptcgp-tracker.com";
pub const DEFAULT_PROFILE_URL_PREFIX: &str = "https://ptcgp-tracker.com/u/";
pub const DEFAULT_MESSAGE_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolsConfig {
    pub tracker_base_url: String,
    pub profile_url_prefix: String,
    pub stale_after_hours: i64,
    pub message_timeout_ms: u64,
    pub logging: LoggingConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            tracker_base_url: DEFAULT_TRACKER_BASE_URL.to_string(),
            profile_url_prefix: DEFAULT_PROFILE_URL_PREFIX.to_string(),
            stale_after_hours: STALE_DATA_HOURS,
            message_timeout_ms: DEFAULT_MESSAGE_TIMEOUT_MS,
            logging: LoggingConfig::default(),
        }
    }
}

impl ToolsConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| TradeToolsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json5(&content)
    }

    pub fn from_json5(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(json5::from_str(content)?)
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_millis(self.message_timeout_ms)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
    #[cfg(feature = "cli")]
    pub fn init(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).with_writer(std::io::stderr).init();
            }
            _ => {
                fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}
