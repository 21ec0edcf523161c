// Configuration source loading.
//
// Priority order:
// 1. Environment variables (LAKESYNC_* prefix)
// 2. Config file path from LAKESYNC_CONFIG
// 3. Inline config content from LAKESYNC_CONFIG_CONTENT
// 4. Default config files (./lakesync.toml, ./.lakesync.toml)
// 5. Built-in defaults

use crate::{ConfigError, LogFormat, RuntimeConfig};
use std::env;
use std::path::Path;

pub const ENV_PREFIX: &str = "LAKESYNC_";

/// Source of environment values, injectable for tests
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{ENV_PREFIX}{key}")).ok()
    }
}

/// Load configuration from files and environment, then validate.
pub fn load_config() -> Result<RuntimeConfig, ConfigError> {
    let mut config = load_from_file()?.unwrap_or_default();
    apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

fn load_from_file() -> Result<Option<RuntimeConfig>, ConfigError> {
    if let Ok(path) = env::var("LAKESYNC_CONFIG") {
        return parse_file(&path).map(Some);
    }

    if let Ok(content) = env::var("LAKESYNC_CONFIG_CONTENT") {
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: "LAKESYNC_CONFIG_CONTENT".to_string(),
            source,
        })?;
        return Ok(Some(config));
    }

    for path in &["./lakesync.toml", "./.lakesync.toml"] {
        if Path::new(path).exists() {
            return parse_file(path).map(Some);
        }
    }

    Ok(None)
}

fn parse_file(path: &str) -> Result<RuntimeConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Apply LAKESYNC_* environment overrides on top of a loaded config.
///
/// List-valued settings (tables, partition values) are comma-separated in
/// the environment; surrounding whitespace per item is trimmed.
pub fn apply_env_overrides(
    config: &mut RuntimeConfig,
    env: &dyn EnvSource,
) -> Result<(), ConfigError> {
    if let Some(database) = env.get("DATABASE") {
        config.catalog.database = database;
    }
    if let Some(region) = env.get("REGION") {
        config.catalog.region = Some(region);
    }
    if let Some(timeout) = env.get("TIMEOUT_SECS") {
        config.catalog.timeout_secs = timeout.parse().map_err(|_| {
            ConfigError::invalid(
                "catalog.timeout_secs",
                format!("not a number of seconds: {timeout}"),
            )
        })?;
    }
    if let Some(tables) = env.get("TABLES") {
        config.sync.tables = split_list(&tables);
    }
    if let Some(values) = env.get("PARTITION_VALUES") {
        config.sync.partition_values = split_list(&values);
    }
    if let Some(level) = env.get("LOG_LEVEL") {
        config.log.level = Some(level);
    }
    if let Some(format) = env.get("LOG_FORMAT") {
        config.log.format = Some(format.parse::<LogFormat>()?);
    }
    Ok(())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for MapEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config: RuntimeConfig = toml::from_str(
            r#"
            [catalog]
            database = "lake"
            [sync]
            tables = ["old_table"]
            partition_values = ["2024", "12"]
            "#,
        )
        .unwrap();

        let env = MapEnv(HashMap::from([
            ("DATABASE", "prod_lake"),
            ("TABLES", "events_csv, events_parquet"),
            ("PARTITION_VALUES", "2025,01"),
            ("TIMEOUT_SECS", "10"),
            ("LOG_FORMAT", "json"),
        ]));
        apply_env_overrides(&mut config, &env).unwrap();

        assert_eq!(config.catalog.database, "prod_lake");
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.sync.tables, vec!["events_csv", "events_parquet"]);
        assert_eq!(config.sync.partition_values, vec!["2025", "01"]);
        assert_eq!(config.log.format, Some(LogFormat::Json));
        config.validate().unwrap();
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        let mut config = RuntimeConfig::default();
        let env = MapEnv(HashMap::from([("TIMEOUT_SECS", "soon")]));
        let err = apply_env_overrides(&mut config, &env).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn list_splitting_trims_and_drops_empties() {
        assert_eq!(split_list(" a ,b,, c"), vec!["a", "b", "c"]);
    }
}
