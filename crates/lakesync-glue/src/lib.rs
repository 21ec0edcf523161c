//! AWS Glue Data Catalog adapter
//!
//! Implements the [`CatalogClient`] seam over Glue's `GetTable` and
//! `BatchCreatePartition` operations. The SDK client is built with the
//! externally configured operation timeout and with retries disabled:
//! re-invocation is the caller's responsibility.

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_glue::error::DisplayErrorContext;
use aws_sdk_glue::types::{
    PartitionError as GluePartitionError, PartitionInput as GluePartitionInput, SerDeInfo,
    StorageDescriptor as GlueStorageDescriptor, Table as GlueTable,
};
use aws_sdk_glue::Client;
use lakesync_catalog::{
    CatalogClient, CatalogError, FieldSchema, ItemError, PartitionInput, RegistrationResult,
    Result, StorageDescriptor, TableDescriptor,
};
use std::time::Duration;

/// Catalog client backed by the AWS Glue Data Catalog
pub struct GlueCatalogClient {
    client: Client,
}

impl GlueCatalogClient {
    /// Connect using ambient AWS credentials (IAM role, env, profile).
    ///
    /// `timeout` bounds each catalog operation; no automatic retries are
    /// issued by the SDK client.
    pub async fn connect(region: Option<&str>, timeout: Duration) -> Self {
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(timeout)
            .build();
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .timeout_config(timeout_config)
            .retry_config(RetryConfig::disabled());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;

        tracing::debug!(
            region = %sdk_config.region().map(|r| r.to_string()).unwrap_or_default(),
            timeout_secs = timeout.as_secs(),
            "Connected to Glue catalog"
        );
        Self {
            client: Client::new(&sdk_config),
        }
    }

    /// Wrap an existing SDK client (used by tests and custom wiring)
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogClient for GlueCatalogClient {
    async fn get_table(&self, database: &str, table: &str) -> Result<TableDescriptor> {
        let output = self
            .client
            .get_table()
            .database_name(database)
            .name(table)
            .send()
            .await;

        match output {
            Ok(output) => {
                let record = output.table().ok_or_else(|| {
                    CatalogError::unavailable(format!(
                        "catalog returned no record for table '{database}.{table}'"
                    ))
                })?;
                table_descriptor_from_glue(database, record)
            }
            Err(err) => {
                let not_found = err
                    .as_service_error()
                    .map(|e| e.is_entity_not_found_exception())
                    .unwrap_or(false);
                if not_found {
                    Err(CatalogError::not_found(database, table))
                } else {
                    Err(CatalogError::unavailable(
                        DisplayErrorContext(err).to_string(),
                    ))
                }
            }
        }
    }

    async fn register_partitions(
        &self,
        database: &str,
        table: &str,
        partitions: Vec<PartitionInput>,
    ) -> Result<RegistrationResult> {
        let inputs: Vec<GluePartitionInput> =
            partitions.iter().map(partition_input_to_glue).collect();

        let output = self
            .client
            .batch_create_partition()
            .database_name(database)
            .table_name(table)
            .set_partition_input_list(Some(inputs))
            .send()
            .await;

        match output {
            Ok(output) => Ok(RegistrationResult {
                errors: output.errors().iter().map(item_error_from_glue).collect(),
            }),
            Err(err) => {
                let not_found = err
                    .as_service_error()
                    .map(|e| e.is_entity_not_found_exception())
                    .unwrap_or(false);
                if not_found {
                    Err(CatalogError::not_found(database, table))
                } else {
                    Err(CatalogError::unavailable(
                        DisplayErrorContext(err).to_string(),
                    ))
                }
            }
        }
    }
}

/// Map a live Glue table record into the wire-neutral descriptor.
///
/// A table without a storage descriptor is a malformed catalog record; the
/// registrar cannot build a partition from it.
fn table_descriptor_from_glue(database: &str, table: &GlueTable) -> Result<TableDescriptor> {
    let storage = table.storage_descriptor().ok_or_else(|| {
        CatalogError::unavailable(format!(
            "table '{database}.{}' has no storage descriptor in the catalog",
            table.name()
        ))
    })?;

    Ok(TableDescriptor {
        database: database.to_string(),
        name: table.name().to_string(),
        partition_keys: table
            .partition_keys()
            .iter()
            .map(|key| FieldSchema::new(key.name(), key.r#type().unwrap_or_default()))
            .collect(),
        storage: storage_from_glue(storage),
    })
}

fn storage_from_glue(storage: &GlueStorageDescriptor) -> StorageDescriptor {
    StorageDescriptor {
        location: storage.location().unwrap_or_default().to_string(),
        input_format: storage.input_format().map(str::to_string),
        output_format: storage.output_format().map(str::to_string),
        serde_library: storage
            .serde_info()
            .and_then(|s| s.serialization_library())
            .map(str::to_string),
        serde_parameters: storage
            .serde_info()
            .and_then(|s| s.parameters())
            .cloned()
            .unwrap_or_default(),
        compressed: storage.compressed(),
    }
}

fn storage_to_glue(storage: &StorageDescriptor) -> GlueStorageDescriptor {
    let serde_info = SerDeInfo::builder()
        .set_serialization_library(storage.serde_library.clone())
        .set_parameters(Some(storage.serde_parameters.clone()))
        .build();

    GlueStorageDescriptor::builder()
        .location(&storage.location)
        .set_input_format(storage.input_format.clone())
        .set_output_format(storage.output_format.clone())
        .serde_info(serde_info)
        .compressed(storage.compressed)
        .build()
}

fn partition_input_to_glue(partition: &PartitionInput) -> GluePartitionInput {
    GluePartitionInput::builder()
        .set_values(Some(partition.values.clone()))
        .storage_descriptor(storage_to_glue(&partition.storage))
        .build()
}

fn item_error_from_glue(error: &GluePartitionError) -> ItemError {
    ItemError {
        values: error.partition_values().to_vec(),
        code: error
            .error_detail()
            .and_then(|d| d.error_code())
            .map(str::to_string),
        message: error
            .error_detail()
            .and_then(|d| d.error_message())
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_glue::types::{Column as GlueColumn, ErrorDetail};
    use std::collections::HashMap;

    fn glue_table() -> GlueTable {
        let serde_info = SerDeInfo::builder()
            .serialization_library("org.apache.hadoop.hive.serde2.lazy.LazySimpleSerDe")
            .parameters("field.delim", ",")
            .build();
        let storage = GlueStorageDescriptor::builder()
            .location("s3://bucket/events/")
            .input_format("org.apache.hadoop.mapred.TextInputFormat")
            .output_format("org.apache.hadoop.hive.ql.io.HiveIgnoreKeyTextOutputFormat")
            .serde_info(serde_info)
            .compressed(false)
            .build();
        GlueTable::builder()
            .name("events")
            .storage_descriptor(storage)
            .partition_keys(
                GlueColumn::builder()
                    .name("year")
                    .r#type("string")
                    .build()
                    .unwrap(),
            )
            .partition_keys(
                GlueColumn::builder()
                    .name("month")
                    .r#type("string")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn live_table_maps_to_descriptor() {
        let descriptor = table_descriptor_from_glue("lake", &glue_table()).unwrap();

        assert_eq!(descriptor.database, "lake");
        assert_eq!(descriptor.name, "events");
        assert_eq!(
            descriptor.partition_keys,
            vec![
                FieldSchema::new("year", "string"),
                FieldSchema::new("month", "string"),
            ]
        );
        assert_eq!(descriptor.storage.location, "s3://bucket/events/");
        assert_eq!(
            descriptor.storage.serde_parameters.get("field.delim"),
            Some(&",".to_string())
        );
        assert!(!descriptor.storage.compressed);
    }

    #[test]
    fn table_without_storage_descriptor_is_rejected() {
        let bare = GlueTable::builder().name("events").build().unwrap();
        let err = table_descriptor_from_glue("lake", &bare).unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable { .. }));
        assert!(err.to_string().contains("storage descriptor"));
    }

    #[test]
    fn partition_input_round_trips_storage_fields() {
        let partition = PartitionInput {
            values: vec!["2025".to_string(), "01".to_string()],
            storage: StorageDescriptor {
                location: "s3://bucket/events/year=2025/month=01/".to_string(),
                input_format: Some("org.apache.hadoop.mapred.TextInputFormat".to_string()),
                output_format: None,
                serde_library: Some("serde.lib".to_string()),
                serde_parameters: HashMap::from([("field.delim".to_string(), "\t".to_string())]),
                compressed: true,
            },
        };

        let glue = partition_input_to_glue(&partition);
        assert_eq!(glue.values(), &["2025".to_string(), "01".to_string()][..]);
        let storage = glue.storage_descriptor().unwrap();
        assert_eq!(
            storage.location(),
            Some("s3://bucket/events/year=2025/month=01/")
        );
        assert_eq!(storage.compressed(), true);
        let serde_info = storage.serde_info().unwrap();
        assert_eq!(serde_info.serialization_library(), Some("serde.lib"));
        assert_eq!(
            serde_info.parameters().unwrap().get("field.delim"),
            Some(&"\t".to_string())
        );
    }

    #[test]
    fn glue_partition_error_maps_to_item_error() {
        let glue_error = GluePartitionError::builder()
            .partition_values("2025")
            .partition_values("01")
            .error_detail(
                ErrorDetail::builder()
                    .error_code("AlreadyExistsException")
                    .error_message("Partition already exists.")
                    .build(),
            )
            .build();

        let item = item_error_from_glue(&glue_error);
        assert_eq!(item.values, vec!["2025", "01"]);
        assert_eq!(item.code.as_deref(), Some("AlreadyExistsException"));
        assert_eq!(item.message.as_deref(), Some("Partition already exists."));
    }
}
