//! lakesync - partition registration synchronizer
//!
//! Registers a newly-landed data partition into the metadata catalog across
//! a configured set of related tables. The heavy lifting lives in the
//! member crates; this crate wires configuration, the Glue-backed catalog
//! client and the registrar into a one-shot run.

pub mod init;

use lakesync_catalog::{CatalogClient, PartitionRegistrar};
use lakesync_config::RuntimeConfig;
use lakesync_glue::GlueCatalogClient;
use std::sync::Arc;
use std::time::Duration;

/// Run one synchronization pass against the AWS Glue catalog.
pub async fn run(config: &RuntimeConfig) -> lakesync_catalog::Result<()> {
    let client = GlueCatalogClient::connect(
        config.catalog.region.as_deref(),
        Duration::from_secs(config.catalog.timeout_secs),
    )
    .await;
    run_with_client(config, Arc::new(client)).await
}

/// Run one synchronization pass with a caller-supplied catalog client.
pub async fn run_with_client(
    config: &RuntimeConfig,
    client: Arc<dyn CatalogClient>,
) -> lakesync_catalog::Result<()> {
    tracing::info!(
        database = %config.catalog.database,
        tables = ?config.sync.tables,
        partition_values = ?config.sync.partition_values,
        "Starting partition sync"
    );

    let registrar = PartitionRegistrar::new(client);
    registrar
        .register_across_tables(
            &config.catalog.database,
            &config.sync.tables,
            &config.sync.partition_values,
        )
        .await?;

    tracing::info!(
        tables = config.sync.tables.len(),
        "Partition sync complete"
    );
    Ok(())
}
