//! Built-in function catalog for Hive and Impala

use super::conversions::converts;
use super::FunctionCatalog;
use crate::completer::Candidate;
use crate::dialect::SqlDialect;
use crate::types::{normalize_type_name, ANY_TYPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Scalar,
    Aggregate,
    Analytic,
}

/// Signature summary of a built-in function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: &'static str,
    /// Possible return types; `T` when it follows the argument type
    pub returns: &'static [&'static str],
    pub kind: FunctionKind,
}

const fn scalar(name: &'static str, returns: &'static [&'static str]) -> FunctionDef {
    FunctionDef {
        name,
        returns,
        kind: FunctionKind::Scalar,
    }
}

const fn aggregate(name: &'static str, returns: &'static [&'static str]) -> FunctionDef {
    FunctionDef {
        name,
        returns,
        kind: FunctionKind::Aggregate,
    }
}

const fn analytic(name: &'static str, returns: &'static [&'static str]) -> FunctionDef {
    FunctionDef {
        name,
        returns,
        kind: FunctionKind::Analytic,
    }
}

const COMMON_FUNCTIONS: &[FunctionDef] = &[
    scalar("abs", &["DOUBLE"]),
    scalar("ceil", &["BIGINT"]),
    scalar("floor", &["BIGINT"]),
    scalar("round", &["DOUBLE"]),
    scalar("rand", &["DOUBLE"]),
    scalar("concat", &["STRING"]),
    scalar("lower", &["STRING"]),
    scalar("upper", &["STRING"]),
    scalar("length", &["INT"]),
    scalar("substr", &["STRING"]),
    scalar("trim", &["STRING"]),
    scalar("coalesce", &["T"]),
    scalar("if", &["T"]),
    scalar("cast", &["T"]),
    scalar("from_unixtime", &["STRING"]),
    scalar("unix_timestamp", &["BIGINT"]),
    scalar("to_date", &["STRING"]),
    scalar("year", &["INT"]),
    aggregate("count", &["BIGINT"]),
    aggregate("sum", &["DOUBLE", "BIGINT"]),
    aggregate("avg", &["DOUBLE"]),
    aggregate("min", &["T"]),
    aggregate("max", &["T"]),
    analytic("row_number", &["BIGINT"]),
    analytic("rank", &["BIGINT"]),
    analytic("dense_rank", &["BIGINT"]),
    analytic("lag", &["T"]),
    analytic("lead", &["T"]),
];

const HIVE_FUNCTIONS: &[FunctionDef] = &[
    scalar("size", &["INT"]),
    scalar("map_keys", &["ARRAY"]),
    scalar("array_contains", &["BOOLEAN"]),
    scalar("get_json_object", &["STRING"]),
    scalar("datediff", &["INT"]),
    aggregate("collect_set", &["ARRAY"]),
    aggregate("collect_list", &["ARRAY"]),
    aggregate("percentile", &["DOUBLE", "ARRAY"]),
    analytic("ntile", &["INT"]),
];

const IMPALA_FUNCTIONS: &[FunctionDef] = &[
    scalar("is_inf", &["BOOLEAN"]),
    scalar("zeroifnull", &["NUMBER"]),
    scalar("now", &["TIMESTAMP"]),
    scalar("datediff", &["INT"]),
    aggregate("group_concat", &["STRING"]),
    aggregate("ndv", &["T"]),
    aggregate("appx_median", &["T"]),
    analytic("first_value", &["T"]),
    analytic("last_value", &["T"]),
];

/// Built-in function catalog with per-dialect implicit conversions
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlFunctions;

impl SqlFunctions {
    pub fn new() -> Self {
        Self
    }

    /// Functions known for a dialect
    pub fn functions(&self, dialect: SqlDialect) -> impl Iterator<Item = &'static FunctionDef> {
        let specific: &'static [FunctionDef] = match dialect {
            SqlDialect::Hive => HIVE_FUNCTIONS,
            SqlDialect::Impala => IMPALA_FUNCTIONS,
            SqlDialect::Generic => &[],
        };
        COMMON_FUNCTIONS.iter().chain(specific.iter())
    }
}

impl FunctionCatalog for SqlFunctions {
    fn suggest_functions(
        &self,
        dialect: SqlDialect,
        types: &[String],
        aggregate: bool,
        analytic: bool,
    ) -> Vec<Candidate> {
        self.functions(dialect)
            .filter(|f| match f.kind {
                FunctionKind::Scalar => true,
                FunctionKind::Aggregate => aggregate,
                FunctionKind::Analytic => analytic,
            })
            .filter(|f| {
                let returns: Vec<String> = f.returns.iter().map(|r| r.to_string()).collect();
                self.matches_type(dialect, types, &returns)
            })
            .map(|f| {
                Candidate::new(
                    format!("{}()", f.name),
                    f.returns.join("|").to_lowercase(),
                    None,
                )
            })
            .collect()
    }

    fn matches_type(&self, dialect: SqlDialect, expected: &[String], actual: &[String]) -> bool {
        if expected.iter().chain(actual).any(|t| t == ANY_TYPE) {
            return true;
        }
        expected.iter().any(|e| {
            let e = normalize_type_name(e);
            actual
                .iter()
                .any(|a| converts(dialect, &normalize_type_name(a), &e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_wildcard_matches_everything() {
        let functions = SqlFunctions::new();
        assert!(functions.matches_type(SqlDialect::Hive, &types(&["T"]), &types(&["BOOLEAN"])));
        assert!(functions.matches_type(SqlDialect::Hive, &types(&["BOOLEAN"]), &types(&["T"])));
    }

    #[test]
    fn test_parameterized_types_are_normalized() {
        let functions = SqlFunctions::new();
        assert!(functions.matches_type(
            SqlDialect::Impala,
            &types(&["DECIMAL"]),
            &types(&["INT"])
        ));
        assert!(functions.matches_type(
            SqlDialect::Hive,
            &types(&["varchar(20)"]),
            &types(&["CHAR(4)"])
        ));
        assert!(!functions.matches_type(
            SqlDialect::Hive,
            &types(&["BOOLEAN"]),
            &types(&["INT"])
        ));
    }

    #[test]
    fn test_bidirectional_match() {
        let functions = SqlFunctions::new();
        let wide = types(&["BIGINT"]);
        let narrow = types(&["INT"]);
        assert!(!functions.matches_type(SqlDialect::Hive, &narrow, &wide));
        assert!(functions.matches_either_way(SqlDialect::Hive, &narrow, &wide));
    }

    #[test]
    fn test_suggest_functions_by_type() {
        let functions = SqlFunctions::new();
        let suggested = functions.suggest_functions(SqlDialect::Hive, &types(&["BOOLEAN"]), false, false);
        let names: Vec<&str> = suggested.iter().map(|c| c.value.as_str()).collect();

        assert!(names.contains(&"array_contains()"));
        // Type-following functions fit anywhere
        assert!(names.contains(&"coalesce()"));
        assert!(!names.contains(&"upper()"));
        assert!(!names.contains(&"max()"), "aggregates not requested");
        assert!(suggested.iter().all(|c| c.weight.is_none()));
    }

    #[test]
    fn test_suggest_aggregate_and_analytic() {
        let functions = SqlFunctions::new();
        let suggested = functions.suggest_functions(SqlDialect::Impala, &types(&["T"]), true, true);
        let names: Vec<&str> = suggested.iter().map(|c| c.value.as_str()).collect();
        assert!(names.contains(&"group_concat()"));
        assert!(names.contains(&"first_value()"));
        assert!(!names.contains(&"collect_set()"));
    }
}
