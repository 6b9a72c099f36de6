//! Configuration management
//!
//! This module handles loading and saving the s3mgr configuration file.
//! The configuration file is stored in TOML format at
//! `<config dir>/s3mgr/config.toml` and never contains credentials; those
//! are resolved through the SDK's standard credential chain.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Default output format
const DEFAULT_OUTPUT: &str = "human";

/// Default color setting
const DEFAULT_COLOR: &str = "auto";

/// Environment variable that overrides the configuration directory
///
/// Used by the integration tests to isolate their configuration.
pub const CONFIG_DIR_ENV: &str = "S3MGR_CONFIG_DIR";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Endpoint settings for non-AWS backends
    #[serde(default)]
    pub endpoint: Endpoint,
}

/// Default settings for CLI behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Output format: "human" or "json"
    #[serde(default = "default_output")]
    pub output: String,

    /// Color mode: "auto", "always", or "never"
    #[serde(default = "default_color")]
    pub color: String,
}

/// Endpoint settings
///
/// When `url` is unset the SDK resolves the endpoint itself (AWS). Setting
/// it points s3mgr at a self-hosted S3-compatible service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Endpoint {
    /// Endpoint URL, e.g. "http://localhost:9000"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Region override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Use path-style addressing (required by most self-hosted backends)
    #[serde(default)]
    pub force_path_style: bool,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            endpoint: Endpoint::default(),
        }
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    ///
    /// Honors the `S3MGR_CONFIG_DIR` environment variable.
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("s3mgr"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %self.config_path.display(), "loaded configuration");

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade s3mgr.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }

    /// Write a configuration file, creating parent directories
    ///
    /// The config file is user-edited; nothing in the CLI writes it back,
    /// so this only exists to round-trip configs in tests.
    #[cfg(test)]
    fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.defaults.output, "human");
        assert_eq!(config.defaults.color, "auto");
        assert!(config.endpoint.url.is_none());
        assert!(!config.endpoint.force_path_style);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_save_and_load() {
        let (manager, _temp_dir) = temp_config_manager();

        let mut config = Config::default();
        config.endpoint.url = Some("http://localhost:9000".to_string());
        config.endpoint.region = Some("us-east-1".to_string());
        config.endpoint.force_path_style = true;

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.endpoint.url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(loaded.endpoint.region.as_deref(), Some("us-east-1"));
        assert!(loaded.endpoint.force_path_style);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let (manager, _temp_dir) = temp_config_manager();

        std::fs::write(manager.config_path(), "schema_version = 1\n").unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.defaults.output, "human");
        assert!(loaded.endpoint.url.is_none());
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!("schema_version = {}\n", SCHEMA_VERSION + 1);
        std::fs::write(manager.config_path(), content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("newer than supported"));
    }
}
