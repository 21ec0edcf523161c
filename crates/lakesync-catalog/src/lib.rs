//! Partitioned table catalog synchronization core
//!
//! This crate holds the catalog-facing core of lakesync: the authored table
//! model, the wire-neutral descriptor types, the partition location
//! resolver, and the registrar that fans a new partition out across related
//! tables. Catalog transport lives behind the [`CatalogClient`] trait; the
//! AWS Glue implementation is in `lakesync-glue`.

mod client;
mod descriptor;
mod error;
mod location;
mod model;
mod registrar;

pub use client::CatalogClient;
pub use descriptor::{
    FieldSchema, ItemError, PartitionInput, RegistrationResult, StorageDescriptor, TableDescriptor,
};
pub use error::{CatalogError, Result};
pub use location::resolve_partition_location;
pub use model::{Column, DataFormat, ScalarType, SerdeOptions, TableDefinition};
pub use registrar::PartitionRegistrar;
