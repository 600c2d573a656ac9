//! In-memory catalog - answers metadata requests from a loaded snapshot

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{
    FieldDescriptor, FieldRequest, HdfsEntry, HdfsListing, MetadataClient, NamedType, TableMeta,
    TablesListing,
};
use crate::dialect::SqlDialect;
use crate::error::{CatalogError, MetadataError};
use crate::types::ColumnType;

pub const DEFAULT_DATABASE: &str = "default";

/// Catalog snapshot - holds databases, tables and a filesystem listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    /// Database name -> Database
    #[serde(default)]
    pub databases: IndexMap<String, DatabaseDef>,
    /// Directory path (e.g. `/user/admin`) -> entries
    #[serde(default)]
    pub filesystem: IndexMap<String, Vec<HdfsEntry>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        let mut catalog = Self::default();
        catalog
            .databases
            .insert(DEFAULT_DATABASE.to_string(), DatabaseDef::default());
        catalog
    }

    /// Load a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let mut catalog: InMemoryCatalog = serde_json::from_str(json)?;
        // Snapshot tables may omit their name and rely on the map key
        for db in catalog.databases.values_mut() {
            for (key, table) in db.tables.iter_mut() {
                if table.name.is_empty() {
                    table.name = key.clone();
                }
            }
        }
        Ok(catalog)
    }

    /// Get or create a database
    pub fn get_or_create_database(&mut self, name: &str) -> &mut DatabaseDef {
        self.databases.entry(name.to_string()).or_default()
    }

    /// Add a table to a database
    pub fn add_table(&mut self, database: &str, table: TableDef) {
        self.get_or_create_database(database)
            .tables
            .insert(table.name.clone(), table);
    }

    /// Look up a table by database and name
    pub fn get_table(&self, database: &str, name: &str) -> Option<&TableDef> {
        self.databases
            .get(database)
            .and_then(|db| db.tables.get(name))
    }

    /// Register the entries of a filesystem directory
    pub fn add_directory(&mut self, path: impl Into<String>, entries: Vec<HdfsEntry>) {
        self.filesystem.insert(path.into(), entries);
    }

    /// Merge another snapshot into this one; later tables replace earlier ones
    pub fn merge(&mut self, other: InMemoryCatalog) {
        for (db_name, db) in other.databases {
            let target = self.get_or_create_database(&db_name);
            for (table_name, table) in db.tables {
                target.tables.insert(table_name, table);
            }
        }
        self.filesystem.extend(other.filesystem);
    }

    fn table_for(&self, database: &str, table: &str) -> Result<&TableDef, MetadataError> {
        let db = self
            .databases
            .get(database)
            .ok_or_else(|| MetadataError::DatabaseNotFound(database.to_string()))?;
        db.tables
            .get(table)
            .or_else(|| {
                db.tables
                    .values()
                    .find(|t| t.name.eq_ignore_ascii_case(table))
            })
            .ok_or_else(|| MetadataError::TableNotFound {
                database: database.to_string(),
                table: table.to_string(),
            })
    }
}

#[async_trait(?Send)]
impl MetadataClient for InMemoryCatalog {
    async fn fetch_fields(
        &self,
        request: FieldRequest<'_>,
    ) -> Result<FieldDescriptor, MetadataError> {
        let table = self.table_for(request.database, request.table)?;
        let Some((first, rest)) = request.fields.split_first() else {
            return Ok(table.describe());
        };

        let not_found = || MetadataError::FieldNotFound {
            table: table.name.clone(),
            path: request.fields.join("."),
        };

        let column = table.get_column(first).ok_or_else(not_found)?;
        let mut current = &column.data_type;
        for segment in rest {
            current = member_type(current, segment).ok_or_else(not_found)?;
        }

        let mut descriptor = describe_type(current);
        if rest.is_empty() && !column.sample.is_empty() {
            descriptor.sample = Some(column.sample.clone());
        }
        Ok(descriptor)
    }

    async fn fetch_tables(
        &self,
        _dialect: SqlDialect,
        database: &str,
        _timeout: Duration,
    ) -> Result<TablesListing, MetadataError> {
        let db = self
            .databases
            .get(database)
            .ok_or_else(|| MetadataError::DatabaseNotFound(database.to_string()))?;
        Ok(TablesListing {
            tables_meta: db
                .tables
                .values()
                .map(|t| TableMeta {
                    name: t.name.clone(),
                    kind: t.kind.label().to_string(),
                })
                .collect(),
        })
    }

    async fn load_databases(&self, _dialect: SqlDialect) -> Result<Vec<String>, MetadataError> {
        Ok(self.databases.keys().cloned().collect())
    }

    async fn fetch_hdfs_path(
        &self,
        path_parts: &[String],
        _timeout: Duration,
    ) -> Result<HdfsListing, MetadataError> {
        let path = format!("/{}", path_parts.join("/"));
        let files = self
            .filesystem
            .get(&path)
            .ok_or(MetadataError::PathNotFound(path))?;
        Ok(HdfsListing {
            files: files.clone(),
            error: None,
        })
    }
}

/// Type reached by one path segment below a complex type
fn member_type<'a>(parent: &'a ColumnType, segment: &str) -> Option<&'a ColumnType> {
    match parent {
        ColumnType::Struct(fields) => fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(segment))
            .map(|f| &f.data_type),
        ColumnType::Array(item) if segment == "item" => Some(item),
        ColumnType::Map { key, .. } if segment == "key" => Some(key),
        ColumnType::Map { value, .. } if segment == "value" => Some(value),
        _ => None,
    }
}

/// Type label used for struct members: the kind for complex types, the full
/// name for scalars
fn member_label(data_type: &ColumnType) -> String {
    if data_type.is_complex() {
        data_type.kind_name().to_string()
    } else {
        data_type.display_name()
    }
}

fn describe_type(data_type: &ColumnType) -> FieldDescriptor {
    match data_type {
        ColumnType::Primitive(name) => FieldDescriptor {
            data_type: Some(name.clone()),
            ..Default::default()
        },
        ColumnType::Struct(fields) => FieldDescriptor {
            data_type: Some("struct".to_string()),
            fields: Some(
                fields
                    .iter()
                    .map(|f| NamedType::new(&f.name, member_label(&f.data_type)))
                    .collect(),
            ),
            ..Default::default()
        },
        ColumnType::Array(item) => FieldDescriptor {
            data_type: Some("array".to_string()),
            item: Some(Box::new(describe_type(item))),
            ..Default::default()
        },
        ColumnType::Map { key, value } => FieldDescriptor {
            data_type: Some("map".to_string()),
            key: Some(Box::new(describe_type(key))),
            value: Some(Box::new(describe_type(value))),
            ..Default::default()
        },
    }
}

/// A database (namespace)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseDef {
    #[serde(default)]
    pub tables: IndexMap<String, TableDef>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    #[default]
    Table,
    View,
}

impl TableKind {
    pub fn label(&self) -> &'static str {
        match self {
            TableKind::Table => "Table",
            TableKind::View => "View",
        }
    }
}

/// Table or view definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: TableKind,
    #[serde(default)]
    pub columns: IndexMap<String, ColumnDef>,
}

impl TableDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TableKind::Table,
            columns: IndexMap::new(),
        }
    }

    pub fn view(name: impl Into<String>) -> Self {
        Self {
            kind: TableKind::View,
            ..Self::new(name)
        }
    }

    /// Add a column from a type string such as `array<int>`
    pub fn with_column(mut self, name: &str, type_name: &str) -> Result<Self, CatalogError> {
        let data_type = ColumnType::parse(type_name).map_err(|source| CatalogError::InvalidType {
            table: self.name.clone(),
            column: name.to_string(),
            source,
        })?;
        self.columns
            .insert(name.to_string(), ColumnDef::new(data_type));
        Ok(self)
    }

    /// Attach sample values to an existing column
    pub fn with_sample(mut self, column: &str, sample: Vec<serde_json::Value>) -> Self {
        if let Some(def) = self.columns.get_mut(column) {
            def.sample = sample;
        }
        self
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnDef> {
        // Case-insensitive lookup
        self.columns
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Table-level descriptor: plain column names plus typed columns
    pub fn describe(&self) -> FieldDescriptor {
        FieldDescriptor {
            columns: Some(self.columns.keys().cloned().collect()),
            extended_columns: Some(
                self.columns
                    .iter()
                    .map(|(name, col)| NamedType::new(name, col.data_type.display_name()))
                    .collect(),
            ),
            ..Default::default()
        }
    }
}

/// Column definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    #[serde(rename = "type")]
    pub data_type: ColumnType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample: Vec<serde_json::Value>,
}

impl ColumnDef {
    pub fn new(data_type: ColumnType) -> Self {
        Self {
            data_type,
            sample: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    fn catalog() -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_table(
            DEFAULT_DATABASE,
            TableDef::new("customers")
                .with_column("id", "int")
                .unwrap()
                .with_column("addresses", "array<struct<city:string,zip:int>>")
                .unwrap()
                .with_column("tags", "map<string,struct<score:double>>")
                .unwrap()
                .with_sample("id", vec![serde_json::json!(1), serde_json::json!(2)]),
        );
        catalog
    }

    fn request<'a>(table: &'a str, fields: &'a [String]) -> FieldRequest<'a> {
        FieldRequest {
            dialect: SqlDialect::Hive,
            database: DEFAULT_DATABASE,
            table,
            fields,
            timeout: Duration::from_secs(1),
        }
    }

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_table_descriptor() {
        let catalog = catalog();
        let descriptor = block_on(catalog.fetch_fields(request("customers", &[]))).unwrap();
        assert_eq!(
            descriptor.columns,
            Some(path(&["id", "addresses", "tags"]))
        );
        let extended = descriptor.extended_columns.unwrap();
        assert_eq!(extended[1].data_type, "array<struct<city:string,zip:int>>");
    }

    #[test]
    fn test_nested_field_descriptors() {
        let catalog = catalog();

        let addresses = path(&["addresses"]);
        let descriptor = block_on(catalog.fetch_fields(request("customers", &addresses))).unwrap();
        assert!(descriptor.is_type("array"));
        let item_fields = FieldDescriptor::nested_fields(descriptor.item.as_deref()).unwrap();
        assert_eq!(item_fields[0], NamedType::new("city", "string"));

        let zip = path(&["addresses", "item", "zip"]);
        let descriptor = block_on(catalog.fetch_fields(request("customers", &zip))).unwrap();
        assert_eq!(descriptor.type_name(), Some("int"));

        let id = path(&["id"]);
        let descriptor = block_on(catalog.fetch_fields(request("customers", &id))).unwrap();
        assert_eq!(descriptor.sample.map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_missing_lookups() {
        let catalog = catalog();
        let bad = path(&["addresses", "city"]);
        assert!(matches!(
            block_on(catalog.fetch_fields(request("customers", &bad))),
            Err(MetadataError::FieldNotFound { .. })
        ));
        assert!(matches!(
            block_on(catalog.fetch_fields(request("nope", &[]))),
            Err(MetadataError::TableNotFound { .. })
        ));
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "databases": {
                "sales": {
                    "tables": {
                        "orders": {"columns": {"id": {"type": "bigint"}}},
                        "recent": {"name": "recent", "type": "view", "columns": {}}
                    }
                }
            },
            "filesystem": {"/user": [{"name": "admin", "type": "dir"}]}
        }"#;
        let catalog = InMemoryCatalog::from_json(json).unwrap();
        let listing =
            block_on(catalog.fetch_tables(SqlDialect::Hive, "sales", Duration::from_secs(1)))
                .unwrap();
        assert_eq!(listing.tables_meta[0].name, "orders");
        assert_eq!(listing.tables_meta[1].kind, "View");

        let files = block_on(catalog.fetch_hdfs_path(&path(&["user"]), Duration::from_secs(1)))
            .unwrap();
        assert_eq!(files.files[0].name, "admin");
    }

    #[test]
    fn test_invalid_column_type() {
        let err = TableDef::new("t").with_column("c", "map<int").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidType { .. }));
    }

    #[test]
    fn test_snapshot_rejects_runaway_type_nesting() {
        let data_type = format!("{}int{}", "array<".repeat(5_000), ">".repeat(5_000));
        let json = serde_json::json!({
            "databases": {"sales": {"tables": {"t": {"columns": {"c": {"type": data_type}}}}}}
        })
        .to_string();

        let err = InMemoryCatalog::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("type nested too deeply"));
    }
}
