//! Completion candidates

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::parse_result::TableReference;

/// Category weights; higher sorts first
pub mod weights {
    pub const COLUMN: i32 = 700;
    pub const VIRTUAL_COLUMN: i32 = 600;
    pub const SAMPLE: i32 = 500;
    pub const IDENTIFIER: i32 = 400;
    pub const CTE: i32 = 300;
    pub const TABLE: i32 = 200;
    pub const DATABASE: i32 = 100;
    pub const HDFS: i32 = 1;
    pub const COLREF_KEYWORD: i32 = -1;
}

/// Characters the editor treats as part of the word being replaced
pub const IDENTIFIER_PATTERN: &str = r"[a-zA-Z_0-9$\x{00A2}-\x{FFFF}]";

pub static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(IDENTIFIER_PATTERN).expect("valid identifier character class"));

/// A suggestion before ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub value: String,
    /// Category label shown next to the value (`keyword`, `table`, a type...)
    pub meta: String,
    /// Unweighted candidates rank after all weighted ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

impl Candidate {
    pub fn new(value: impl Into<String>, meta: impl Into<String>, weight: Option<i32>) -> Self {
        Self {
            value: value.into(),
            meta: meta.into(),
            weight,
        }
    }

    pub fn weighted(value: impl Into<String>, meta: impl Into<String>, weight: i32) -> Self {
        Self::new(value, meta, Some(weight))
    }
}

/// Column suggestion that still knows which table contributed it; the table
/// is only needed to qualify duplicates and is dropped afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCandidate<'a> {
    pub value: String,
    pub meta: String,
    pub table: &'a TableReference,
}

impl<'a> ColumnCandidate<'a> {
    pub fn new(value: impl Into<String>, meta: impl Into<String>, table: &'a TableReference) -> Self {
        Self {
            value: value.into(),
            meta: meta.into(),
            table,
        }
    }

    pub fn into_candidate(self) -> Candidate {
        Candidate::weighted(self.value, self.meta, weights::COLUMN)
    }
}

/// Ranked suggestion delivered to the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub value: String,
    pub meta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    pub score: i32,
    pub prioritize_score: bool,
}

/// Final ordered result of one completion request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Completions {
    pub items: Vec<CompletionItem>,
    /// Word-boundary character class, shared by every item
    pub identifier_regex: &'static str,
}

impl Completions {
    pub fn new(items: Vec<CompletionItem>) -> Self {
        Self {
            items,
            identifier_regex: IDENTIFIER_PATTERN,
        }
    }

    pub fn values(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.value.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, value: &str) -> Option<&CompletionItem> {
        self.items.iter().find(|i| i.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_regex() {
        assert!(IDENTIFIER_REGEX.is_match("a"));
        assert!(IDENTIFIER_REGEX.is_match("$"));
        assert!(IDENTIFIER_REGEX.is_match("é"));
        assert!(!IDENTIFIER_REGEX.is_match(" "));
        assert!(!IDENTIFIER_REGEX.is_match("."));
    }

    #[test]
    fn test_column_candidate_drops_table() {
        let table = TableReference::table("orders");
        let candidate = ColumnCandidate::new("id", "int", &table).into_candidate();
        assert_eq!(candidate, Candidate::weighted("id", "int", weights::COLUMN));
    }
}
