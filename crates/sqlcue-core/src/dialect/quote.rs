//! Identifier quoting

use once_cell::sync::Lazy;
use regex::Regex;

use super::SqlDialect;

pub const QUOTE_CHAR: char = '`';

static BARE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid identifier pattern"));

/// Check whether text can be used unquoted as an identifier
pub fn is_bare_identifier(text: &str) -> bool {
    BARE_IDENTIFIER.is_match(text)
}

/// Wrap an identifier in backticks when it needs quoting.
///
/// Text that already starts with a backtick is returned as is. Otherwise the
/// identifier is quoted when its upper-cased form is reserved in the active
/// dialect or in any other supported dialect, or when it is not shaped like a
/// bare identifier (a letter followed by letters, digits or underscores).
pub fn quote_identifier(text: &str, dialect: SqlDialect) -> String {
    if text.starts_with(QUOTE_CHAR) {
        return text.to_string();
    }

    let upper = text.to_uppercase();
    let reserved = dialect.is_reserved(&upper)
        || SqlDialect::ALL
            .iter()
            .filter(|other| **other != dialect)
            .any(|other| other.is_reserved(&upper));

    if reserved || !is_bare_identifier(text) {
        format!("{QUOTE_CHAR}{text}{QUOTE_CHAR}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_word_is_quoted() {
        assert_eq!(quote_identifier("order", SqlDialect::Hive), "`order`");
        assert_eq!(quote_identifier("Select", SqlDialect::Impala), "`Select`");
    }

    #[test]
    fn test_other_dialect_reserved_word_is_quoted() {
        // PARQUET is only reserved in Impala
        assert_eq!(quote_identifier("parquet", SqlDialect::Hive), "`parquet`");
        // SORT is only reserved in Hive
        assert_eq!(quote_identifier("sort", SqlDialect::Generic), "`sort`");
    }

    #[test]
    fn test_plain_identifier_unchanged() {
        for dialect in SqlDialect::ALL {
            assert_eq!(quote_identifier("myCol1", dialect), "myCol1");
            assert_eq!(quote_identifier("customer_id", dialect), "customer_id");
        }
    }

    #[test]
    fn test_irregular_shape_is_quoted() {
        assert_eq!(quote_identifier("1col", SqlDialect::Hive), "`1col`");
        assert_eq!(quote_identifier("my col", SqlDialect::Hive), "`my col`");
        assert_eq!(quote_identifier("_tmp", SqlDialect::Impala), "`_tmp`");
        assert_eq!(quote_identifier("", SqlDialect::Impala), "``");
    }

    #[test]
    fn test_quoting_is_idempotent() {
        let samples = ["order", "myCol1", "my col", "", "`already`", "_x", "täble", "limit"];
        for dialect in SqlDialect::ALL {
            for sample in samples {
                let once = quote_identifier(sample, dialect);
                assert_eq!(quote_identifier(&once, dialect), once, "sample {sample:?}");
            }
        }
    }
}
