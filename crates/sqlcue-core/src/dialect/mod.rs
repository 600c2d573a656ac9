//! SQL dialect support

mod keywords;
mod quote;

use std::collections::HashSet;
use std::str::FromStr;

pub use quote::{is_bare_identifier, quote_identifier, QUOTE_CHAR};

/// Supported SQL dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SqlDialect {
    #[default]
    Hive,
    Impala,
    /// Any other editor type; gets no dialect-specific behavior
    Generic,
}

impl SqlDialect {
    pub const ALL: [SqlDialect; 3] = [SqlDialect::Hive, SqlDialect::Impala, SqlDialect::Generic];

    /// Reserved words of this dialect: the base set plus dialect-specific extras
    pub fn reserved_keywords(&self) -> [&'static HashSet<&'static str>; 2] {
        match self {
            SqlDialect::Hive => [&keywords::HIVE_RESERVED, &keywords::HIVE_EXTRA_RESERVED],
            SqlDialect::Impala => [&keywords::IMPALA_RESERVED, &keywords::EMPTY],
            SqlDialect::Generic => [&keywords::EMPTY, &keywords::EMPTY],
        }
    }

    /// Check whether an upper-cased word is reserved in this dialect
    pub fn is_reserved(&self, upper: &str) -> bool {
        self.reserved_keywords()
            .iter()
            .any(|set| set.contains(upper))
    }

    /// Suffix appended to complex (array/map) column names to hint indexing
    pub fn complex_suffix(&self) -> &'static str {
        match self {
            SqlDialect::Hive => "[]",
            SqlDialect::Impala | SqlDialect::Generic => "",
        }
    }

    /// Whether map columns expose synthetic `key` and `value` accessors
    pub fn has_map_accessors(&self) -> bool {
        matches!(self, SqlDialect::Impala)
    }

    /// Whether tables carry the Hive virtual columns
    pub fn has_virtual_columns(&self) -> bool {
        matches!(self, SqlDialect::Hive)
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hive" => Ok(SqlDialect::Hive),
            "impala" => Ok(SqlDialect::Impala),
            "generic" | "sql" => Ok(SqlDialect::Generic),
            _ => Err(format!(
                "Unknown dialect: '{}'. Supported dialects: hive, impala, generic.",
                s
            )),
        }
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlDialect::Hive => write!(f, "hive"),
            SqlDialect::Impala => write!(f, "impala"),
            SqlDialect::Generic => write!(f, "generic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("HIVE".parse::<SqlDialect>(), Ok(SqlDialect::Hive));
        assert_eq!("impala".parse::<SqlDialect>(), Ok(SqlDialect::Impala));
        assert!("oracle".parse::<SqlDialect>().is_err());
    }

    #[test]
    fn test_reserved_sets_are_dialect_specific() {
        assert!(SqlDialect::Hive.is_reserved("ORDER"));
        assert!(SqlDialect::Hive.is_reserved("LIMIT"));
        assert!(SqlDialect::Impala.is_reserved("PARQUET"));
        assert!(!SqlDialect::Hive.is_reserved("PARQUET"));
        assert!(!SqlDialect::Generic.is_reserved("SELECT"));
    }
}
