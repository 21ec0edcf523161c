// lakesync-config - Runtime configuration for the partition synchronizer
//
// Supports configuration from multiple sources:
// 1. Environment variables (LAKESYNC_* prefix, highest priority)
// 2. Config file path from LAKESYNC_CONFIG env var
// 3. Config file contents from LAKESYNC_CONFIG_CONTENT env var
// 4. Default config file locations (./lakesync.toml, ./.lakesync.toml)
// 5. Built-in defaults (lowest priority)
//
// The loaded config is an explicit immutable bundle constructed once at
// entry and passed by parameter into the registrar wiring; the core never
// reads ambient environment state.

use serde::Deserialize;
use thiserror::Error;

mod platform;
mod sources;
mod validation;

pub use platform::Platform;
pub use sources::{apply_env_overrides, EnvSource};

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {key}")]
    Missing { key: String },

    #[error("invalid configuration for {key}: {reason}")]
    Invalid { key: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Main runtime configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub catalog: CatalogSection,
    pub sync: SyncSection,
    pub log: LogSection,
}

/// Catalog connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Catalog database (namespace) holding the target tables
    pub database: String,
    /// Catalog service region; falls back to the ambient SDK default when unset
    pub region: Option<String>,
    /// Shared timeout for each of the two network calls per table; the
    /// synchronizer issues no automatic retries
    pub timeout_secs: u64,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            database: String::new(),
            region: None,
            timeout_secs: 30,
        }
    }
}

/// What to register: the fan-out table list and the partition values
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncSection {
    /// Tables that must receive an identical partition, in fan-out order
    pub tables: Vec<String>,
    /// One value per partition key, in the tables' declared key order
    pub partition_values: Vec<String>,
}

/// Logging settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid(
                "log.format",
                format!("unsupported log format: {s}. Supported: text, json"),
            )),
        }
    }
}

impl LogSection {
    pub fn resolved_level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    /// Log format, defaulting per platform (json on Lambda, text on CLI)
    pub fn resolved_format(&self, platform: Platform) -> LogFormat {
        self.format.unwrap_or(match platform {
            Platform::Lambda => LogFormat::Json,
            Platform::Cli => LogFormat::Text,
        })
    }
}

impl RuntimeConfig {
    /// Load configuration from all sources with priority
    pub fn load() -> Result<Self, ConfigError> {
        sources::load_config()
    }

    /// Validate the configuration.
    ///
    /// Fails before any catalog call is attempted when a required value is
    /// absent or malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_incomplete_until_filled() {
        let config = RuntimeConfig::default();
        assert!(config.validate().is_err());
        assert_eq!(config.catalog.timeout_secs, 30);
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn log_format_defaults_per_platform() {
        let log = LogSection::default();
        assert_eq!(log.resolved_format(Platform::Cli), LogFormat::Text);
        assert_eq!(log.resolved_format(Platform::Lambda), LogFormat::Json);

        let explicit = LogSection {
            level: None,
            format: Some(LogFormat::Text),
        };
        assert_eq!(explicit.resolved_format(Platform::Lambda), LogFormat::Text);
    }

    #[test]
    fn toml_round_trip() {
        let config: RuntimeConfig = toml::from_str(
            r#"
            [catalog]
            database = "lake"
            region = "eu-west-1"

            [sync]
            tables = ["events_csv", "events_parquet"]
            partition_values = ["2025", "01"]

            [log]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.catalog.database, "lake");
        assert_eq!(config.catalog.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.sync.tables.len(), 2);
        assert_eq!(config.log.resolved_level(), "debug");
    }
}
