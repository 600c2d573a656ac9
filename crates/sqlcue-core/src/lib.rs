//! sqlcue-core: SQL completion resolution
//!
//! Turns a parser's description of what may follow the cursor into a ranked
//! list of completion candidates, fetching tables, columns, databases and
//! filesystem paths from a metadata client.

pub mod completer;
pub mod dialect;
pub mod error;
pub mod functions;
pub mod metadata;
pub mod parse_result;
pub mod types;

pub use completer::{
    Candidate, Completer, CompleterOptions, CompletionItem, Completions, Editor, SqlParser,
};
pub use dialect::{quote_identifier, SqlDialect};
pub use error::{CatalogError, MetadataError, TypeParseError};
pub use functions::{FunctionCatalog, SqlFunctions};
pub use metadata::{InMemoryCatalog, MetadataClient, TimeoutClient};
pub use parse_result::ParseResult;
pub use types::ColumnType;
