//! Bot configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed configuration load.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid configuration JSON.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Connection settings for the ledger service.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the ledger service; empty means no service configured.
    #[serde(default)]
    pub base_url: String,
    /// Name this application authenticates as.
    #[serde(default)]
    pub app_name: String,
    /// Password for the application account.
    #[serde(default)]
    pub app_password: String,
}

/// Bot configuration, loaded from a JSON file.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Prefix users type before a command name, e.g. `!`.
    #[serde(default = "default_prefix")]
    pub command_prefix: String,
    /// Ledger service connection.
    #[serde(default)]
    pub api: ApiConfig,
    /// Logging directives in env-filter syntax, e.g. `info` or
    /// `tallybot=debug`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_prefix: default_prefix(),
            api: ApiConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Loads the configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file is unreadable or malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Whether a ledger service endpoint is configured.
    #[must_use]
    pub fn has_api_endpoint(&self) -> bool {
        !self.api.base_url.is_empty()
    }
}
