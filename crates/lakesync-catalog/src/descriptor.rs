//! Wire-neutral descriptor types mirroring what the catalog stores
//!
//! These are deliberately separate from the authored [`TableDefinition`]:
//! a live table may have been altered out-of-band after provisioning, and
//! the registrar must treat the fetched descriptor, not the authored model,
//! as the source of truth for a new partition's storage descriptor.
//!
//! [`TableDefinition`]: crate::model::TableDefinition

use std::collections::HashMap;
use std::fmt;

/// A partition key as the catalog reports it (type as a free-form string)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub type_name: String,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// The catalog's record of where and how data is physically stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageDescriptor {
    /// Root storage URI (table) or resolved partition URI (partition)
    pub location: String,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub serde_library: Option<String>,
    pub serde_parameters: HashMap<String, String>,
    pub compressed: bool,
}

/// A table record as fetched from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub database: String,
    pub name: String,
    /// Partition keys in declared order; order is load-bearing for both
    /// value binding and path segment order
    pub partition_keys: Vec<FieldSchema>,
    pub storage: StorageDescriptor,
}

/// A single partition registration request item.
///
/// Transient: constructed per registration call and not retained after
/// submission; the catalog service is the system of record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionInput {
    /// One value per partition key, in declared key order
    pub values: Vec<String>,
    /// The table's live storage descriptor with only `location` replaced
    pub storage: StorageDescriptor,
}

/// A structured per-partition error reported by a batch registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemError {
    /// The partition values the error refers to
    pub values: Vec<String>,
    /// Catalog error code (e.g. "AlreadyExistsException"), if provided
    pub code: Option<String>,
    /// Human-readable catalog detail, if provided
    pub message: Option<String>,
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} (values: {})",
            self.code.as_deref().unwrap_or("unknown"),
            self.message.as_deref().unwrap_or("no detail"),
            self.values.join(", ")
        )
    }
}

/// Outcome of a batch registration call.
///
/// The batch is not transactional: a non-empty error list means some items
/// may have registered while others did not. Callers treat any non-empty
/// list as total failure for the call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationResult {
    pub errors: Vec<ItemError>,
}

impl RegistrationResult {
    /// A fully successful registration
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
