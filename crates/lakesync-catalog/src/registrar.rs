//! Partition registration orchestration
//!
//! One pass per table: fetch the live descriptor, resolve the partition
//! location, submit a single-partition batch, fail on any reported item
//! error. The fan-out applies the same partition values across related
//! tables sequentially with fail-fast, no-rollback semantics.

use crate::client::CatalogClient;
use crate::descriptor::PartitionInput;
use crate::error::{CatalogError, Result};
use crate::location::resolve_partition_location;
use std::sync::Arc;

/// Registers newly-landed partitions into the catalog
pub struct PartitionRegistrar {
    client: Arc<dyn CatalogClient>,
}

impl PartitionRegistrar {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Register one partition for one table.
    ///
    /// The partition's storage descriptor is the table's CURRENT descriptor
    /// with only `location` replaced, so the partition stays readable with
    /// the table's live reader configuration even if the table was altered
    /// after creation.
    ///
    /// # Errors
    /// [`CatalogError::RegistrationFailed`] if the catalog reports any
    /// per-item error; errors from the fetch and resolve steps propagate
    /// unchanged.
    pub async fn register_partition(
        &self,
        database: &str,
        table: &str,
        values: &[String],
    ) -> Result<()> {
        let descriptor = self.client.get_table(database, table).await?;
        tracing::debug!(
            database = %database,
            table = %table,
            base_location = %descriptor.storage.location,
            "Fetched live table descriptor"
        );

        let location = resolve_partition_location(
            &descriptor.storage.location,
            &descriptor.partition_keys,
            values,
        )?;

        let mut storage = descriptor.storage.clone();
        storage.location = location.clone();
        let partition = PartitionInput {
            values: values.to_vec(),
            storage,
        };

        let result = self
            .client
            .register_partitions(database, table, vec![partition])
            .await?;
        if !result.is_success() {
            return Err(CatalogError::registration_failed(table, result.errors));
        }

        tracing::info!(
            database = %database,
            table = %table,
            location = %location,
            "Registered partition"
        );
        Ok(())
    }

    /// Register the same partition values across a set of related tables.
    ///
    /// Tables are processed sequentially in the given order. On failure the
    /// fan-out halts before attempting subsequent tables; partitions already
    /// registered for earlier tables are NOT undone. Re-invoking after a
    /// partial failure will re-register those earlier partitions, which the
    /// catalog is expected to reject as already existing.
    pub async fn register_across_tables(
        &self,
        database: &str,
        tables: &[String],
        values: &[String],
    ) -> Result<()> {
        for table in tables {
            self.register_partition(database, table, values).await?;
        }
        Ok(())
    }
}
