// Configuration validation
//
// Validates that required fields are present and values are sensible,
// before any catalog call is attempted.

use crate::{ConfigError, RuntimeConfig};
use tracing::warn;

pub fn validate_config(config: &RuntimeConfig) -> Result<(), ConfigError> {
    if config.catalog.database.is_empty() {
        return Err(ConfigError::missing("catalog.database"));
    }
    if config.catalog.timeout_secs == 0 {
        return Err(ConfigError::invalid(
            "catalog.timeout_secs",
            "must be greater than 0",
        ));
    }

    if config.sync.tables.is_empty() {
        return Err(ConfigError::missing("sync.tables"));
    }
    if config.sync.tables.iter().any(|t| t.is_empty()) {
        return Err(ConfigError::invalid(
            "sync.tables",
            "table names must not be empty",
        ));
    }

    if config.sync.partition_values.is_empty() {
        return Err(ConfigError::missing("sync.partition_values"));
    }
    if config.sync.partition_values.iter().any(|v| v.is_empty()) {
        return Err(ConfigError::invalid(
            "sync.partition_values",
            "partition values must not be empty",
        ));
    }

    // Path delimiters in partition values are not escaped downstream; the
    // resulting location will not mean what the caller intended.
    for value in &config.sync.partition_values {
        if value.contains('/') {
            warn!(
                value = %value,
                "partition value contains a path delimiter; resulting storage location is ambiguous"
            );
        }
    }

    Ok(())
}
