//! Completer - resolves a parse result into ranked completion candidates
//!
//! Immediate suggestions (keywords, identifiers, CTE names) are produced while
//! dispatching. Everything that needs metadata runs as a branch future; all
//! branches are joined before columns are qualified and the list is ranked.
//! A branch never fails: a failed fetch contributes nothing.

mod candidate;
mod column_reference;
mod columns;
mod listings;
mod rank;

use std::time::Duration;

use futures::future::{join_all, FutureExt, LocalBoxFuture, Shared};
use tracing::debug;

use crate::dialect::{quote_identifier, SqlDialect};
use crate::functions::FunctionCatalog;
use crate::metadata::{MetadataClient, DEFAULT_DATABASE};
use crate::parse_result::{ParseResult, SubQuery, Suggestion, TypeRequirement};
use crate::types::ANY_TYPE;

pub use candidate::{
    weights, Candidate, ColumnCandidate, CompletionItem, Completions, IDENTIFIER_PATTERN,
    IDENTIFIER_REGEX,
};
pub use column_reference::ColumnReference;
pub use rank::TOP_SCORE;

/// Hive virtual columns offered alongside table columns
const VIRTUAL_COLUMNS: [&str; 2] = ["BLOCK__OFFSET__INSIDE__FILE", "INPUT__FILE__NAME"];

/// Default per-fetch timeout handed to the metadata client
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Settings of a completer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleterOptions {
    pub dialect: SqlDialect,
    /// Database used when the parse result names none
    pub default_database: String,
    /// Passed unchanged to every metadata fetch
    pub timeout: Duration,
}

impl Default for CompleterOptions {
    fn default() -> Self {
        Self {
            dialect: SqlDialect::default(),
            default_database: DEFAULT_DATABASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CompleterOptions {
    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_default_database(mut self, database: impl Into<String>) -> Self {
        self.default_database = database.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Host editor handle; only used to stop the busy indicator
pub trait Editor {
    fn hide_spinner(&self);
}

/// External SQL parser producing the parse result for a cursor position
pub trait SqlParser {
    fn parse_sql(&self, before_cursor: &str, after_cursor: &str, dialect: SqlDialect)
        -> ParseResult;
}

/// What one branch adds to the result
#[derive(Debug, Default)]
struct Contribution<'a> {
    completions: Vec<Candidate>,
    /// Columns still awaiting qualification
    columns: Vec<ColumnCandidate<'a>>,
}

impl<'a> Contribution<'a> {
    fn completions(completions: Vec<Candidate>) -> Self {
        Self {
            completions,
            columns: Vec::new(),
        }
    }

    fn columns(columns: Vec<ColumnCandidate<'a>>) -> Self {
        Self {
            completions: Vec::new(),
            columns,
        }
    }
}

/// Read-only state shared by every branch of one request
struct BranchContext<'a> {
    dialect: SqlDialect,
    metadata: &'a dyn MetadataClient,
    functions: &'a dyn FunctionCatalog,
    timeout: Duration,
    database: &'a str,
    lower_case: bool,
    sub_queries: &'a [SubQuery],
}

impl BranchContext<'_> {
    fn quote(&self, text: &str) -> String {
        quote_identifier(text, self.dialect)
    }
}

type Branch<'f, 'a> = LocalBoxFuture<'f, Contribution<'a>>;
type SharedColumnReference<'f> = Shared<LocalBoxFuture<'f, Option<ColumnReference>>>;

/// Completion engine over a metadata client and a function catalog
pub struct Completer<'a> {
    metadata: &'a dyn MetadataClient,
    functions: &'a dyn FunctionCatalog,
    options: CompleterOptions,
}

impl<'a> Completer<'a> {
    pub fn new(metadata: &'a dyn MetadataClient, functions: &'a dyn FunctionCatalog) -> Self {
        Self {
            metadata,
            functions,
            options: CompleterOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompleterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CompleterOptions {
        &self.options
    }

    /// Resolve every suggestion the parse result requests and rank them
    pub async fn complete(&self, parse_result: &ParseResult) -> Completions {
        let ctx = BranchContext {
            dialect: self.options.dialect,
            metadata: self.metadata,
            functions: self.functions,
            timeout: self.options.timeout,
            database: parse_result
                .use_database
                .as_deref()
                .unwrap_or(&self.options.default_database),
            lower_case: parse_result.lower_case,
            sub_queries: &parse_result.sub_queries,
        };
        let ctx = &ctx;

        let column_reference: SharedColumnReference<'_> =
            column_reference::resolve_column_reference(ctx, parse_result.col_ref.as_ref())
                .boxed_local()
                .shared();

        let mut completions = Vec::new();
        let mut branches: Vec<Branch<'_, '_>> = Vec::new();

        // Drives the column-reference fetch even when no branch below awaits it
        {
            let column_reference = column_reference.clone();
            branches.push(
                async move {
                    column_reference.await;
                    Contribution::default()
                }
                .boxed_local(),
            );
        }

        for suggestion in parse_result.suggestions() {
            match suggestion {
                Suggestion::Keywords(keywords) => {
                    completions.extend(keywords.iter().map(|keyword| {
                        let value = if ctx.lower_case {
                            keyword.value.to_lowercase()
                        } else {
                            keyword.value.clone()
                        };
                        Candidate::weighted(value, "keyword", keyword.weight)
                    }));
                }
                Suggestion::Identifiers(identifiers) => {
                    completions.extend(identifiers.iter().map(|identifier| {
                        Candidate::weighted(
                            identifier.name.clone(),
                            identifier.kind.clone(),
                            weights::IDENTIFIER,
                        )
                    }));
                }
                Suggestion::CommonTableExpressions(expressions) => {
                    completions.extend(expressions.iter().map(|expression| {
                        let prefix = expression.hints.render(ctx.lower_case);
                        Candidate::weighted(
                            format!("{prefix}{}", expression.name),
                            "CTE",
                            weights::CTE,
                        )
                    }));
                }
                Suggestion::Functions {
                    types,
                    aggregate,
                    analytic,
                } => {
                    let column_reference = column_reference.clone();
                    branches.push(
                        async move {
                            let types = required_types(types, column_reference).await;
                            Contribution::completions(ctx.functions.suggest_functions(
                                ctx.dialect,
                                &types,
                                aggregate,
                                analytic,
                            ))
                        }
                        .boxed_local(),
                    );
                }
                Suggestion::Values => {
                    let column_reference = column_reference.clone();
                    branches.push(
                        async move {
                            let reference =
                                column_reference.await.unwrap_or_else(ColumnReference::any);
                            Contribution::completions(sample_values(&reference))
                        }
                        .boxed_local(),
                    );
                }
                Suggestion::ColumnReferenceKeywords(keywords_by_type) => {
                    let column_reference = column_reference.clone();
                    branches.push(
                        async move {
                            let reference =
                                column_reference.await.unwrap_or_else(ColumnReference::any);
                            let actual = reference.type_constraint();
                            let mut candidates = Vec::new();
                            for (type_name, keywords) in keywords_by_type {
                                let expected = [type_name.clone()];
                                if !ctx.functions.matches_type(ctx.dialect, &expected, &actual) {
                                    continue;
                                }
                                candidates.extend(keywords.iter().map(|keyword| {
                                    let value = if ctx.lower_case {
                                        keyword.to_lowercase()
                                    } else {
                                        keyword.clone()
                                    };
                                    Candidate::weighted(value, "keyword", weights::COLREF_KEYWORD)
                                }));
                            }
                            Contribution::completions(candidates)
                        }
                        .boxed_local(),
                    );
                }
                Suggestion::Columns {
                    tables,
                    types,
                    has_identifier_chain,
                } => {
                    if ctx.dialect.has_virtual_columns() && !has_identifier_chain {
                        completions.extend(VIRTUAL_COLUMNS.iter().map(|name| {
                            Candidate::weighted(*name, "virtual", weights::VIRTUAL_COLUMN)
                        }));
                    }
                    let column_reference = column_reference.clone();
                    branches.push(
                        async move {
                            let types = required_types(types, column_reference).await;
                            let per_table = join_all(
                                tables
                                    .iter()
                                    .map(|table| columns::table_columns(ctx, table, &types)),
                            )
                            .await;
                            Contribution::columns(per_table.into_iter().flatten().collect())
                        }
                        .boxed_local(),
                    );
                }
                Suggestion::Databases(suggestion) => {
                    branches.push(listings::databases(ctx, suggestion).boxed_local());
                }
                Suggestion::Hdfs(suggestion) => {
                    branches.push(listings::hdfs(ctx, suggestion).boxed_local());
                }
                Suggestion::Tables(suggestion) => {
                    branches.push(listings::tables(ctx, suggestion).boxed_local());
                }
            }
        }

        let mut columns = Vec::new();
        for contribution in join_all(branches).await {
            completions.extend(contribution.completions);
            columns.extend(contribution.columns);
        }

        debug!(
            candidates = completions.len(),
            columns = columns.len(),
            "branches joined"
        );

        rank::qualify_columns(&mut columns);
        completions.extend(columns.into_iter().map(ColumnCandidate::into_candidate));

        Completions::new(rank::finalize(completions))
    }

    /// Complete, hide the editor's spinner and hand the result to `callback`
    pub async fn complete_with_callback<F>(
        &self,
        parse_result: &ParseResult,
        callback: F,
        editor: Option<&dyn Editor>,
    ) where
        F: FnOnce(Completions),
    {
        let completions = self.complete(parse_result).await;
        if let Some(editor) = editor {
            editor.hide_spinner();
        }
        callback(completions);
    }

    /// Parse the text around the cursor and complete it
    pub async fn autocomplete<P, F>(
        &self,
        parser: &P,
        before_cursor: &str,
        after_cursor: &str,
        callback: F,
        editor: Option<&dyn Editor>,
    ) where
        P: SqlParser + ?Sized,
        F: FnOnce(Completions),
    {
        let parse_result = parser.parse_sql(before_cursor, after_cursor, self.options.dialect);
        self.complete_with_callback(&parse_result, callback, editor)
            .await;
    }
}

/// Concrete type list for a branch, waiting on the column reference when the
/// parser deferred to its type
async fn required_types(
    requirement: TypeRequirement,
    column_reference: SharedColumnReference<'_>,
) -> Vec<String> {
    match requirement {
        TypeRequirement::Types(types) => types,
        TypeRequirement::ColumnReference => match column_reference.await {
            Some(reference) => reference.type_constraint(),
            None => vec![ANY_TYPE.to_string()],
        },
    }
}

fn sample_values(reference: &ColumnReference) -> Vec<Candidate> {
    let quoted = reference.data_type.eq_ignore_ascii_case("string");
    reference
        .sample
        .iter()
        .map(|sample| {
            let text = sample_text(sample);
            let value = if quoted { format!("'{text}'") } else { text };
            Candidate::weighted(value, "value", weights::SAMPLE)
        })
        .collect()
}

fn sample_text(sample: &serde_json::Value) -> String {
    match sample {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_options() {
        let options = CompleterOptions::default();
        assert_eq!(options.dialect, SqlDialect::Hive);
        assert_eq!(options.default_database, "default");
        assert_eq!(options.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_string_samples_are_quoted() {
        let reference = ColumnReference {
            data_type: "string".to_string(),
            sample: vec![json!("SFO"), json!("JFK")],
        };
        let values: Vec<String> = sample_values(&reference)
            .into_iter()
            .map(|c| c.value)
            .collect();
        assert_eq!(values, vec!["'SFO'", "'JFK'"]);
    }

    #[test]
    fn test_numeric_samples_are_bare() {
        let reference = ColumnReference {
            data_type: "int".to_string(),
            sample: vec![json!(42), json!(7.5)],
        };
        let candidates = sample_values(&reference);
        assert_eq!(candidates[0], Candidate::weighted("42", "value", weights::SAMPLE));
        assert_eq!(candidates[1].value, "7.5");
    }
}
