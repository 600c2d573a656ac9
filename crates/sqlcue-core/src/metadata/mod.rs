//! Metadata access: the client trait, wire descriptors and bundled clients

mod catalog;
mod timeout;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::dialect::SqlDialect;
use crate::error::MetadataError;

pub use catalog::{ColumnDef, DatabaseDef, InMemoryCatalog, TableDef, TableKind, DEFAULT_DATABASE};
pub use timeout::TimeoutClient;

/// Request for the definition of a table or of a nested field inside it
#[derive(Debug, Clone, Copy)]
pub struct FieldRequest<'a> {
    pub dialect: SqlDialect,
    pub database: &'a str,
    pub table: &'a str,
    /// Path below the table, e.g. `["address", "item", "city"]`; empty for
    /// the table itself
    pub fields: &'a [String],
    pub timeout: Duration,
}

/// Asynchronous source of catalog metadata.
///
/// Implementations perform the actual fetches and enforce the timeout they
/// are handed. A failed or timed-out fetch is reported as an error; the
/// completer turns it into an empty contribution.
#[async_trait(?Send)]
pub trait MetadataClient {
    /// Fetch the definition of a table (`fields` empty) or of a nested field
    async fn fetch_fields(&self, request: FieldRequest<'_>)
        -> Result<FieldDescriptor, MetadataError>;

    /// List the tables and views of a database
    async fn fetch_tables(
        &self,
        dialect: SqlDialect,
        database: &str,
        timeout: Duration,
    ) -> Result<TablesListing, MetadataError>;

    /// List database names
    async fn load_databases(&self, dialect: SqlDialect) -> Result<Vec<String>, MetadataError>;

    /// List the entries of a filesystem directory given as path segments
    async fn fetch_hdfs_path(
        &self,
        path_parts: &[String],
        timeout: Duration,
    ) -> Result<HdfsListing, MetadataError>;
}

/// Definition of a table or field as returned by the metadata service.
///
/// A table carries `columns` and `extended_columns`; a field carries its
/// `type` plus `fields` (struct), `item` (array) or `key`/`value` (map).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_columns: Option<Vec<NamedType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<NamedType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Box<FieldDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Box<FieldDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<FieldDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<Vec<serde_json::Value>>,
}

impl FieldDescriptor {
    pub fn type_name(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    pub fn is_type(&self, kind: &str) -> bool {
        self.type_name() == Some(kind)
    }

    /// Member fields of a struct reached through this container (`item` of an
    /// array, `value` of a map)
    pub fn nested_fields(container: Option<&FieldDescriptor>) -> Option<&[NamedType]> {
        container.and_then(|c| c.fields.as_deref())
    }
}

/// Name and type pair used for columns and struct members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

impl NamedType {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesListing {
    #[serde(default)]
    pub tables_meta: Vec<TableMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    pub name: String,
    /// `Table` or `View`, in any case
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdfsListing {
    #[serde(default)]
    pub files: Vec<HdfsEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdfsEntry {
    pub name: String,
    /// `file` or `dir`
    #[serde(rename = "type")]
    pub kind: String,
}

impl HdfsEntry {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}
