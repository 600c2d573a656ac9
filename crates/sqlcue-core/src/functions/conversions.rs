//! Implicit type conversion tables

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::dialect::SqlDialect;

type ConversionTable = HashMap<&'static str, HashSet<&'static str>>;

/// Expected type -> types implicitly accepted in its place
fn table(entries: &[(&'static str, &[&'static str])]) -> ConversionTable {
    entries
        .iter()
        .map(|(expected, accepted)| {
            let mut set: HashSet<&'static str> = accepted.iter().copied().collect();
            set.insert(expected);
            (*expected, set)
        })
        .collect()
}

static HIVE: Lazy<ConversionTable> = Lazy::new(|| {
    table(&[
        ("TINYINT", &[]),
        ("SMALLINT", &["TINYINT"]),
        ("INT", &["TINYINT", "SMALLINT", "INTEGER"]),
        ("INTEGER", &["TINYINT", "SMALLINT", "INT"]),
        ("BIGINT", &["TINYINT", "SMALLINT", "INT", "INTEGER"]),
        ("FLOAT", &["TINYINT", "SMALLINT", "INT", "INTEGER", "BIGINT"]),
        (
            "DOUBLE",
            &["TINYINT", "SMALLINT", "INT", "INTEGER", "BIGINT", "FLOAT", "STRING", "VARCHAR", "CHAR"],
        ),
        (
            "DECIMAL",
            &["TINYINT", "SMALLINT", "INT", "INTEGER", "BIGINT", "FLOAT", "DOUBLE", "STRING", "VARCHAR", "CHAR"],
        ),
        (
            "NUMBER",
            &["TINYINT", "SMALLINT", "INT", "INTEGER", "BIGINT", "FLOAT", "DOUBLE", "DECIMAL"],
        ),
        ("STRING", &["CHAR", "VARCHAR", "DATE", "TIMESTAMP"]),
        ("VARCHAR", &["CHAR", "STRING", "DATE", "TIMESTAMP"]),
        ("CHAR", &["VARCHAR", "STRING"]),
        ("DATE", &["STRING", "VARCHAR", "CHAR", "TIMESTAMP"]),
        ("TIMESTAMP", &["STRING", "VARCHAR", "CHAR", "DATE"]),
        ("BOOLEAN", &[]),
        ("BINARY", &[]),
    ])
});

static IMPALA: Lazy<ConversionTable> = Lazy::new(|| {
    table(&[
        ("TINYINT", &[]),
        ("SMALLINT", &["TINYINT"]),
        ("INT", &["TINYINT", "SMALLINT", "INTEGER"]),
        ("INTEGER", &["TINYINT", "SMALLINT", "INT"]),
        ("BIGINT", &["TINYINT", "SMALLINT", "INT", "INTEGER"]),
        ("FLOAT", &["TINYINT", "SMALLINT", "INT", "INTEGER", "BIGINT"]),
        ("DOUBLE", &["TINYINT", "SMALLINT", "INT", "INTEGER", "BIGINT", "FLOAT"]),
        ("REAL", &["TINYINT", "SMALLINT", "INT", "INTEGER", "BIGINT", "FLOAT", "DOUBLE"]),
        ("DECIMAL", &["TINYINT", "SMALLINT", "INT", "INTEGER", "BIGINT"]),
        (
            "NUMBER",
            &["TINYINT", "SMALLINT", "INT", "INTEGER", "BIGINT", "FLOAT", "DOUBLE", "REAL", "DECIMAL"],
        ),
        ("STRING", &["CHAR", "VARCHAR"]),
        ("VARCHAR", &["CHAR", "STRING"]),
        ("CHAR", &["VARCHAR", "STRING"]),
        ("TIMESTAMP", &["STRING", "VARCHAR", "CHAR"]),
        ("BOOLEAN", &[]),
    ])
});

/// Whether a value of type `actual` is implicitly accepted where `expected`
/// is required. Both names are normalized (upper-case base names).
pub(super) fn converts(dialect: SqlDialect, actual: &str, expected: &str) -> bool {
    if actual == expected {
        return true;
    }
    let lookup = |table: &ConversionTable| {
        table
            .get(expected)
            .is_some_and(|accepted| accepted.contains(actual))
    };
    match dialect {
        SqlDialect::Hive => lookup(&HIVE),
        SqlDialect::Impala => lookup(&IMPALA),
        SqlDialect::Generic => lookup(&HIVE) || lookup(&IMPALA),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_widening() {
        assert!(converts(SqlDialect::Hive, "INT", "BIGINT"));
        assert!(!converts(SqlDialect::Hive, "BIGINT", "INT"));
        assert!(converts(SqlDialect::Impala, "SMALLINT", "NUMBER"));
    }

    #[test]
    fn test_string_to_double_is_hive_only() {
        assert!(converts(SqlDialect::Hive, "STRING", "DOUBLE"));
        assert!(!converts(SqlDialect::Impala, "STRING", "DOUBLE"));
        assert!(converts(SqlDialect::Generic, "STRING", "DOUBLE"));
    }
}
