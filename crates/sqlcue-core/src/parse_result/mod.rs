//! Parse result model
//!
//! The external SQL parser describes which token kinds are valid at the
//! cursor as a loosely-typed object where each populated field requests one
//! kind of suggestion. [`ParseResult`] mirrors that wire shape for
//! deserialization; [`ParseResult::suggestions`] turns it into the closed
//! [`Suggestion`] variant set the completer dispatches on.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::ANY_TYPE;

/// Type placeholder meaning "the type of the resolved column reference"
pub const COLREF_TYPE: &str = "COLREF";

/// Prefix of bound-variable placeholders such as `${var}`
pub const VARIABLE_MARKER: &str = "${";

/// Facts reported by the parser for the cursor position
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_keywords: Option<Vec<KeywordSuggestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_identifiers: Option<Vec<IdentifierSuggestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_common_table_expressions: Option<Vec<CteSuggestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_ref: Option<ColumnReferenceRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_functions: Option<FunctionsSuggestion>,
    #[serde(default)]
    pub suggest_aggregate_functions: bool,
    #[serde(default)]
    pub suggest_analytic_functions: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_values: Option<serde_json::Value>,
    /// Type name → keywords valid after a column of that type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_col_ref_keywords: Option<IndexMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_columns: Option<ColumnsSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_databases: Option<DatabasesSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_hdfs: Option<HdfsSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_tables: Option<TablesSuggestion>,
    #[serde(default)]
    pub sub_queries: Vec<SubQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_database: Option<String>,
    #[serde(default)]
    pub lower_case: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSuggestion {
    #[serde(alias = "text")]
    pub value: String,
    pub weight: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierSuggestion {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Literal prefix hints shared by CTE, table and database suggestions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixHints {
    #[serde(default)]
    pub prepend_question_mark: bool,
    #[serde(default)]
    pub prepend_from: bool,
}

impl PrefixHints {
    /// Build the literal prefix, e.g. `? FROM `
    pub fn render(&self, lower_case: bool) -> String {
        let mut prefix = String::new();
        if self.prepend_question_mark {
            prefix.push_str("? ");
        }
        if self.prepend_from {
            prefix.push_str(if lower_case { "from " } else { "FROM " });
        }
        prefix
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CteSuggestion {
    pub name: String,
    #[serde(flatten)]
    pub hints: PrefixHints,
}

/// One segment of a dotted identifier chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn is_variable(&self) -> bool {
        self.name.starts_with(VARIABLE_MARKER)
    }
}

/// Build an identifier chain from dotted text, e.g. `a.b.c`
pub fn identifier_chain(dotted: &str) -> Vec<Identifier> {
    dotted.split('.').map(Identifier::new).collect()
}

/// Identifier chain whose type must be resolved against the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReferenceRequest {
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default)]
    pub identifier_chain: Vec<Identifier>,
}

impl ColumnReferenceRequest {
    /// Whether any segment is a bound-variable placeholder
    pub fn references_variable(&self) -> bool {
        self.identifier_chain.iter().any(Identifier::is_variable)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionsSuggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsSuggestion {
    #[serde(default)]
    pub tables: Vec<TableReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_chain: Option<Vec<Identifier>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabasesSuggestion {
    #[serde(flatten)]
    pub hints: PrefixHints,
    #[serde(default)]
    pub append_dot: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HdfsSuggestion {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablesSuggestion {
    #[serde(flatten)]
    pub hints: PrefixHints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default)]
    pub only_tables: bool,
    #[serde(default)]
    pub only_views: bool,
}

/// A table in scope: a catalog table (optionally with a nested field path)
/// or a named sub-query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_chain: Option<Vec<Identifier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_query: Option<String>,
}

impl TableReference {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn sub_query(alias: impl Into<String>) -> Self {
        Self {
            sub_query: Some(alias.into()),
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_identifier_chain(mut self, chain: Vec<Identifier>) -> Self {
        self.identifier_chain = Some(chain);
        self
    }

    /// Name used to qualify this table's columns: its alias, else its table
    /// name, else the sub-query it points at
    pub fn qualifier(&self) -> &str {
        self.alias
            .as_deref()
            .or(self.table.as_deref())
            .or(self.sub_query.as_deref())
            .unwrap_or_default()
    }
}

/// Derived table visible in the current scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubQuery {
    pub alias: String,
    #[serde(default)]
    pub columns: Vec<SubQueryColumn>,
    #[serde(default)]
    pub sub_queries: Vec<SubQuery>,
}

/// Projected column of a sub-query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubQueryColumn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_chain: Option<Vec<Identifier>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_query: Option<String>,
}

/// Requested types, possibly deferred to the column reference's type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRequirement {
    /// Use the resolved column reference type
    ColumnReference,
    Types(Vec<String>),
}

impl TypeRequirement {
    fn from_types(types: Option<&Vec<String>>) -> Self {
        match types {
            Some(types) if types.first().map(String::as_str) == Some(COLREF_TYPE) => {
                TypeRequirement::ColumnReference
            }
            Some(types) if !types.is_empty() => TypeRequirement::Types(types.clone()),
            _ => TypeRequirement::Types(vec![ANY_TYPE.to_string()]),
        }
    }

    pub fn depends_on_column_reference(&self) -> bool {
        matches!(self, TypeRequirement::ColumnReference)
    }
}

/// One kind of suggestion requested by the parse result
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion<'a> {
    Keywords(&'a [KeywordSuggestion]),
    Identifiers(&'a [IdentifierSuggestion]),
    CommonTableExpressions(&'a [CteSuggestion]),
    Functions {
        types: TypeRequirement,
        aggregate: bool,
        analytic: bool,
    },
    Values,
    ColumnReferenceKeywords(&'a IndexMap<String, Vec<String>>),
    Columns {
        tables: &'a [TableReference],
        types: TypeRequirement,
        has_identifier_chain: bool,
    },
    Databases(&'a DatabasesSuggestion),
    Hdfs(&'a HdfsSuggestion),
    Tables(&'a TablesSuggestion),
}

impl ParseResult {
    /// Every suggestion kind requested by this parse result, in dispatch order
    pub fn suggestions(&self) -> Vec<Suggestion<'_>> {
        let mut suggestions = Vec::new();

        if let Some(keywords) = &self.suggest_keywords {
            suggestions.push(Suggestion::Keywords(keywords));
        }
        if let Some(identifiers) = &self.suggest_identifiers {
            suggestions.push(Suggestion::Identifiers(identifiers));
        }
        if let Some(ctes) = &self.suggest_common_table_expressions {
            suggestions.push(Suggestion::CommonTableExpressions(ctes));
        }
        if let Some(functions) = &self.suggest_functions {
            suggestions.push(Suggestion::Functions {
                types: TypeRequirement::from_types(functions.types.as_ref()),
                aggregate: self.suggest_aggregate_functions,
                analytic: self.suggest_analytic_functions,
            });
        }
        if self.suggest_values.as_ref().is_some_and(is_requested) {
            suggestions.push(Suggestion::Values);
        }
        if let Some(keywords) = &self.suggest_col_ref_keywords {
            suggestions.push(Suggestion::ColumnReferenceKeywords(keywords));
        }
        if let Some(columns) = &self.suggest_columns {
            suggestions.push(Suggestion::Columns {
                tables: &columns.tables,
                types: TypeRequirement::from_types(columns.types.as_ref()),
                has_identifier_chain: columns.identifier_chain.is_some(),
            });
        }
        if let Some(databases) = &self.suggest_databases {
            suggestions.push(Suggestion::Databases(databases));
        }
        if let Some(hdfs) = &self.suggest_hdfs {
            suggestions.push(Suggestion::Hdfs(hdfs));
        }
        if let Some(tables) = &self.suggest_tables {
            suggestions.push(Suggestion::Tables(tables));
        }

        suggestions
    }
}

/// The parser flags value suggestions with `true` or an object
fn is_requested(value: &serde_json::Value) -> bool {
    !matches!(value, serde_json::Value::Null | serde_json::Value::Bool(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_parse_result() {
        let json = r#"{
            "suggestKeywords": [{"value": "SELECT", "weight": 10}],
            "suggestColumns": {
                "tables": [{"table": "orders", "alias": "o"}, {"subQuery": "s1"}],
                "types": ["COLREF"]
            },
            "colRef": {"table": "orders", "identifierChain": [{"name": "amount"}]},
            "suggestTables": {"prependFrom": true, "onlyViews": true},
            "lowerCase": true
        }"#;
        let parsed: ParseResult = serde_json::from_str(json).unwrap();

        assert!(parsed.lower_case);
        assert_eq!(parsed.col_ref.as_ref().unwrap().identifier_chain[0].name, "amount");
        let tables = parsed.suggest_tables.as_ref().unwrap();
        assert!(tables.hints.prepend_from);
        assert!(tables.only_views);

        let suggestions = parsed.suggestions();
        assert_eq!(suggestions.len(), 3);
        match &suggestions[1] {
            Suggestion::Columns { tables, types, .. } => {
                assert_eq!(tables[0].qualifier(), "o");
                assert_eq!(tables[1].sub_query.as_deref(), Some("s1"));
                assert!(types.depends_on_column_reference());
            }
            other => panic!("expected columns suggestion, got {other:?}"),
        }
    }

    #[test]
    fn test_default_types_are_wildcard() {
        let parsed: ParseResult =
            serde_json::from_str(r#"{"suggestFunctions": {}, "suggestValues": false}"#).unwrap();
        let suggestions = parsed.suggestions();
        assert_eq!(
            suggestions,
            vec![Suggestion::Functions {
                types: TypeRequirement::Types(vec!["T".to_string()]),
                aggregate: false,
                analytic: false,
            }]
        );
    }

    #[test]
    fn test_prefix_hints() {
        let hints = PrefixHints {
            prepend_question_mark: true,
            prepend_from: true,
        };
        assert_eq!(hints.render(false), "? FROM ");
        assert_eq!(hints.render(true), "? from ");
        assert_eq!(PrefixHints::default().render(false), "");
    }

    #[test]
    fn test_variable_reference() {
        let request = ColumnReferenceRequest {
            table: "t".to_string(),
            database: None,
            identifier_chain: identifier_chain("${col}.x"),
        };
        assert!(request.references_variable());
    }
}
