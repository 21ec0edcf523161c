//! Catalog client seam
//!
//! The registrar talks to the metadata catalog through this trait so the
//! core stays independent of any one catalog service; the AWS Glue adapter
//! lives in the `lakesync-glue` crate and tests use an in-memory mock.

use crate::descriptor::{PartitionInput, RegistrationResult, TableDescriptor};
use crate::error::Result;
use async_trait::async_trait;

/// Abstraction over a remote metadata catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch a table's current record from the catalog.
    ///
    /// The returned descriptor reflects what the catalog stores NOW, which
    /// may diverge from the authored definition if the table was altered
    /// out-of-band.
    ///
    /// # Errors
    /// [`CatalogError::NotFound`] if the table does not exist,
    /// [`CatalogError::Unavailable`] on transport or auth failure.
    ///
    /// [`CatalogError::NotFound`]: crate::error::CatalogError::NotFound
    /// [`CatalogError::Unavailable`]: crate::error::CatalogError::Unavailable
    async fn get_table(&self, database: &str, table: &str) -> Result<TableDescriptor>;

    /// Attempt to add all given partitions in one batch.
    ///
    /// The batch is not transactional. Per-item failures are reported in the
    /// [`RegistrationResult`], not as an `Err`; `Err` is reserved for
    /// transport-level failures where nothing was attempted.
    async fn register_partitions(
        &self,
        database: &str,
        table: &str,
        partitions: Vec<PartitionInput>,
    ) -> Result<RegistrationResult>;
}
