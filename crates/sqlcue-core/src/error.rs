//! Error types

use miette::Diagnostic;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a metadata client.
///
/// The completer never surfaces these to its caller: a branch whose fetch
/// fails contributes nothing and the remaining branches still complete.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MetadataError {
    #[error("Database '{0}' not found")]
    #[diagnostic(code(sqlcue::metadata::database_not_found))]
    DatabaseNotFound(String),

    #[error("Table '{database}.{table}' not found")]
    #[diagnostic(code(sqlcue::metadata::table_not_found))]
    TableNotFound { database: String, table: String },

    #[error("Field '{path}' not found in table '{table}'")]
    #[diagnostic(code(sqlcue::metadata::field_not_found))]
    FieldNotFound { table: String, path: String },

    #[error("Path '{0}' not found")]
    #[diagnostic(code(sqlcue::metadata::path_not_found))]
    PathNotFound(String),

    #[error("Metadata request timed out after {0:?}")]
    #[diagnostic(
        code(sqlcue::metadata::timeout),
        help("Increase the completion timeout or check the metadata service")
    )]
    Timeout(Duration),

    #[error("Metadata service unavailable: {0}")]
    #[diagnostic(code(sqlcue::metadata::unavailable))]
    Unavailable(String),
}

/// Malformed column type string
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("Invalid type '{input}' at position {position}: {reason}")]
#[diagnostic(code(sqlcue::types::invalid))]
pub struct TypeParseError {
    pub input: String,
    pub position: usize,
    pub reason: String,
}

/// Failure while loading a catalog snapshot
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("Invalid catalog snapshot: {0}")]
    #[diagnostic(code(sqlcue::catalog::json))]
    Json(#[from] serde_json::Error),

    #[error("Column '{column}' of table '{table}' has an invalid type")]
    #[diagnostic(code(sqlcue::catalog::invalid_type))]
    InvalidType {
        table: String,
        column: String,
        #[source]
        source: TypeParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MetadataError::TableNotFound {
            database: "default".to_string(),
            table: "orders".to_string(),
        };
        assert_eq!(err.to_string(), "Table 'default.orders' not found");

        let err = MetadataError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Metadata request timed out after 250ms");
    }
}
