//! Error types for catalog operations

use crate::descriptor::ItemError;
use thiserror::Error;

/// Errors that can occur while resolving and registering partitions
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Required configuration value absent or malformed
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// Referenced table does not exist in the catalog
    #[error("table '{database}.{table}' not found in catalog")]
    NotFound {
        /// Catalog database (namespace)
        database: String,
        /// Table name
        table: String,
    },

    /// Transport or auth failure reaching the catalog; not retried here
    #[error("catalog unavailable: {reason}")]
    Unavailable { reason: String },

    /// Partition value count does not match the table's declared partition keys
    #[error("partition key arity mismatch: table declares {expected} partition key(s), {actual} value(s) given")]
    ArityMismatch { expected: usize, actual: usize },

    /// The catalog accepted the request but reported per-item errors.
    ///
    /// Partitions registered for earlier tables in a fan-out stay registered;
    /// the raw catalog detail is carried for manual remediation.
    #[error("partition registration failed for table '{table}': {}", format_item_errors(.errors))]
    RegistrationFailed {
        /// The table whose registration reported errors
        table: String,
        /// Per-partition errors as reported by the catalog
        errors: Vec<ItemError>,
    },
}

impl CatalogError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a not-found error for a table
    pub fn not_found(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self::NotFound {
            database: database.into(),
            table: table.into(),
        }
    }

    /// Create an unavailable error with the transport-level reason
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Create a registration-failed error carrying the catalog's item errors
    pub fn registration_failed(table: impl Into<String>, errors: Vec<ItemError>) -> Self {
        Self::RegistrationFailed {
            table: table.into(),
            errors,
        }
    }
}

fn format_item_errors(errors: &[ItemError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_failed_display_names_table_and_detail() {
        let err = CatalogError::registration_failed(
            "events_csv",
            vec![ItemError {
                values: vec!["2024".into(), "04".into()],
                code: Some("AlreadyExistsException".into()),
                message: Some("Partition already exists.".into()),
            }],
        );
        let text = err.to_string();
        assert!(text.contains("events_csv"));
        assert!(text.contains("AlreadyExistsException"));
        assert!(text.contains("2024"));
    }

    #[test]
    fn arity_mismatch_display_counts() {
        let err = CatalogError::ArityMismatch {
            expected: 2,
            actual: 1,
        };
        assert!(err.to_string().contains("2 partition key(s)"));
        assert!(err.to_string().contains("1 value(s)"));
    }
}
