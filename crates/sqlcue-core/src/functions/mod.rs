//! Function and type catalog
//!
//! The completer asks the function catalog for functions whose return type
//! fits a position, and for type compatibility when filtering columns.

mod builtin;
mod conversions;

use crate::completer::Candidate;
use crate::dialect::SqlDialect;

pub use builtin::{FunctionDef, FunctionKind, SqlFunctions};

/// Type-directed function suggestions and type compatibility
pub trait FunctionCatalog {
    /// Functions returning one of `types`; aggregate and analytic functions
    /// are only included when requested
    fn suggest_functions(
        &self,
        dialect: SqlDialect,
        types: &[String],
        aggregate: bool,
        analytic: bool,
    ) -> Vec<Candidate>;

    /// Whether a value of any of `actual` is accepted where one of `expected`
    /// is required
    fn matches_type(&self, dialect: SqlDialect, expected: &[String], actual: &[String]) -> bool;

    /// Compatibility in either direction
    fn matches_either_way(&self, dialect: SqlDialect, a: &[String], b: &[String]) -> bool {
        self.matches_type(dialect, a, b) || self.matches_type(dialect, b, a)
    }
}
