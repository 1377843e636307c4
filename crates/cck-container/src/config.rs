//! Application configuration
//!
//! Figment-based layered loading: compiled defaults, then an optional TOML
//! file, then `CCK_`-prefixed environment variables (highest precedence).
//! The client selector typically arrives through the environment
//! (`CCK_CLIENT_ID=acme`) or the CLI, which merges over this config.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use cck_domain::error::{Error, Result};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON-formatted log lines
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Client whose module layer to load
    pub client_id: Option<String>,
    /// Preset whose module layer to load (mutually exclusive with client_id)
    pub preset: Option<String>,
    /// Base URL for the backing API handle
    pub api_base_url: Option<String>,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional TOML file, and the
    /// environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed("CCK_").split("__"))
            .extract()
            .map_err(|e| Error::config_with_source("failed to load configuration", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_selector() {
        let config = AppConfig::default();
        assert!(config.client_id.is_none());
        assert!(config.preset.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.logging.level, "info");
    }
}
