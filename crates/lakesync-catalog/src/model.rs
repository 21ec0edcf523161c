//! Authored table model
//!
//! A [`TableDefinition`] describes one catalog table as written at schema
//! provisioning time. It is immutable and read-only to this subsystem: the
//! registrar never mutates schema, it only appends partition metadata.
//!
//! Column order is load-bearing. The underlying row-oriented data carries no
//! field names, so records are matched to columns positionally. Partition
//! key order is fixed once a table exists: it defines both the required
//! argument order for partition values and the order of path segments in
//! storage.

use crate::descriptor::{FieldSchema, StorageDescriptor, TableDescriptor};
use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Scalar column types supported by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Boolean,
    String,
    Date,
    Timestamp,
}

impl ScalarType {
    /// The catalog's lowercase type-name rendering
    pub fn catalog_name(&self) -> &'static str {
        match self {
            Self::SmallInt => "smallint",
            Self::Int => "int",
            Self::BigInt => "bigint",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
        }
    }
}

/// One typed column (or partition key)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub scalar_type: ScalarType,
}

impl Column {
    pub fn new(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            scalar_type,
        }
    }
}

/// Storage format family for a table's data files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    /// Row-oriented delimited text records
    DelimitedText,
    /// Binary columnar files
    Columnar,
}

/// Serialization options for [`DataFormat::DelimitedText`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerdeOptions {
    /// Field delimiter within a record
    pub field_delimiter: char,
    /// Number of leading header lines to skip per file
    pub skip_header_lines: u32,
    /// When true, records shorter than the column list read as trailing
    /// NULLs; when false the reader treats them strictly
    pub missing_fields_as_null: bool,
}

impl Default for SerdeOptions {
    fn default() -> Self {
        Self {
            field_delimiter: ',',
            skip_header_lines: 0,
            missing_fields_as_null: true,
        }
    }
}

// Hive-ecosystem format and serde identifiers the catalog stores verbatim.
const TEXT_INPUT_FORMAT: &str = "org.apache.hadoop.mapred.TextInputFormat";
const TEXT_OUTPUT_FORMAT: &str = "org.apache.hadoop.hive.ql.io.HiveIgnoreKeyTextOutputFormat";
const LAZY_SIMPLE_SERDE: &str = "org.apache.hadoop.hive.serde2.lazy.LazySimpleSerDe";
const OPEN_CSV_SERDE: &str = "org.apache.hadoop.hive.serde2.OpenCSVSerde";
const COLUMNAR_INPUT_FORMAT: &str =
    "org.apache.hadoop.hive.ql.io.parquet.MapredParquetInputFormat";
const COLUMNAR_OUTPUT_FORMAT: &str =
    "org.apache.hadoop.hive.ql.io.parquet.MapredParquetOutputFormat";
const COLUMNAR_SERDE: &str = "org.apache.hadoop.hive.ql.io.parquet.serde.ParquetHiveSerDe";

/// Immutable description of one catalog table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableDefinition {
    /// Unique identifier within a database
    pub name: String,
    /// Data columns, in positional order
    pub columns: Vec<Column>,
    /// Partition keys, in declared order; disjoint from `columns`
    #[serde(default)]
    pub partition_keys: Vec<Column>,
    /// Root storage URI for the table's data, without partition segments
    pub base_location: String,
    pub format: DataFormat,
    /// Serialization options; relevant for [`DataFormat::DelimitedText`]
    #[serde(default)]
    pub serde: SerdeOptions,
}

impl TableDefinition {
    /// Check the model invariants.
    ///
    /// Fails with [`CatalogError::Configuration`] on an empty name, empty
    /// column list, empty base location, duplicate column names, or a
    /// partition key that shadows a data column.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(CatalogError::configuration("table name must not be empty"));
        }
        if self.columns.is_empty() {
            return Err(CatalogError::configuration(format!(
                "table '{}' declares no columns",
                self.name
            )));
        }
        if self.base_location.is_empty() {
            return Err(CatalogError::configuration(format!(
                "table '{}' has no base location",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for column in self.columns.iter().chain(self.partition_keys.iter()) {
            if !seen.insert(column.name.as_str()) {
                return Err(CatalogError::configuration(format!(
                    "table '{}': column name '{}' declared more than once (column and partition key names must be disjoint)",
                    self.name, column.name
                )));
            }
        }
        Ok(())
    }

    /// Partition key names in declared order
    pub fn partition_key_names(&self) -> Vec<&str> {
        self.partition_keys.iter().map(|k| k.name.as_str()).collect()
    }

    /// Render the authored definition as a wire-neutral descriptor.
    ///
    /// Used when seeding a catalog at provisioning time and by tests; at
    /// registration time the live descriptor fetched from the catalog wins.
    pub fn to_descriptor(&self, database: &str) -> TableDescriptor {
        let (input_format, output_format, serde_library) = match self.format {
            DataFormat::DelimitedText => {
                let serde = if self.serde.missing_fields_as_null {
                    LAZY_SIMPLE_SERDE
                } else {
                    OPEN_CSV_SERDE
                };
                (TEXT_INPUT_FORMAT, TEXT_OUTPUT_FORMAT, serde)
            }
            DataFormat::Columnar => (COLUMNAR_INPUT_FORMAT, COLUMNAR_OUTPUT_FORMAT, COLUMNAR_SERDE),
        };

        let mut serde_parameters = HashMap::new();
        if self.format == DataFormat::DelimitedText {
            let delimiter = self.serde.field_delimiter.to_string();
            serde_parameters.insert("field.delim".to_string(), delimiter.clone());
            serde_parameters.insert("serialization.format".to_string(), delimiter);
            if self.serde.skip_header_lines > 0 {
                serde_parameters.insert(
                    "skip.header.line.count".to_string(),
                    self.serde.skip_header_lines.to_string(),
                );
            }
        }

        TableDescriptor {
            database: database.to_string(),
            name: self.name.clone(),
            partition_keys: self
                .partition_keys
                .iter()
                .map(|k| FieldSchema::new(&k.name, k.scalar_type.catalog_name()))
                .collect(),
            storage: StorageDescriptor {
                location: self.base_location.clone(),
                input_format: Some(input_format.to_string()),
                output_format: Some(output_format.to_string()),
                serde_library: Some(serde_library.to_string()),
                serde_parameters,
                compressed: false,
            },
        }
    }
}
