//! Catalog listing branches: databases, tables and filesystem paths

use tracing::debug;

use super::candidate::{weights, Candidate};
use super::{BranchContext, Contribution};
use crate::parse_result::{DatabasesSuggestion, HdfsSuggestion, TablesSuggestion};

pub(super) async fn databases<'a>(
    ctx: &BranchContext<'a>,
    suggestion: &DatabasesSuggestion,
) -> Contribution<'a> {
    let prefix = suggestion.hints.render(ctx.lower_case);
    let suffix = if suggestion.append_dot { "." } else { "" };

    match ctx.metadata.load_databases(ctx.dialect).await {
        Ok(names) => Contribution::completions(
            names
                .iter()
                .map(|db| {
                    Candidate::weighted(
                        format!("{prefix}{}{suffix}", ctx.quote(db)),
                        "database",
                        weights::DATABASE,
                    )
                })
                .collect(),
        ),
        Err(err) => {
            debug!(error = %err, "database listing failed");
            Contribution::default()
        }
    }
}

pub(super) async fn tables<'a>(
    ctx: &BranchContext<'a>,
    suggestion: &TablesSuggestion,
) -> Contribution<'a> {
    let prefix = suggestion.hints.render(ctx.lower_case);
    let database = suggestion.database.as_deref().unwrap_or(ctx.database);

    let listing = match ctx.metadata.fetch_tables(ctx.dialect, database, ctx.timeout).await {
        Ok(listing) => listing,
        Err(err) => {
            debug!(database, error = %err, "table listing failed");
            return Contribution::default();
        }
    };

    let candidates = listing
        .tables_meta
        .iter()
        .filter_map(|meta| {
            let kind = meta.kind.to_lowercase();
            if (suggestion.only_tables && kind != "table")
                || (suggestion.only_views && kind != "view")
            {
                return None;
            }
            Some(Candidate::weighted(
                format!("{prefix}{}", ctx.quote(&meta.name)),
                kind,
                weights::TABLE,
            ))
        })
        .collect();
    Contribution::completions(candidates)
}

/// Directory segments of a partially typed quoted path: the opening quote
/// and the trailing partial name are dropped, e.g. `'/user/ad` → `["user"]`
pub(super) fn hdfs_path_parts(path: &str) -> Vec<String> {
    let mut parts: Vec<String> = path.split('/').map(str::to_string).collect();
    if !parts.is_empty() {
        parts.remove(0);
    }
    parts.pop();
    parts
}

pub(super) async fn hdfs<'a>(
    ctx: &BranchContext<'a>,
    suggestion: &HdfsSuggestion,
) -> Contribution<'a> {
    let parts = hdfs_path_parts(&suggestion.path);

    let listing = match ctx.metadata.fetch_hdfs_path(&parts, ctx.timeout).await {
        Ok(listing) => listing,
        Err(err) => {
            debug!(path = %suggestion.path, error = %err, "path listing failed");
            return Contribution::default();
        }
    };
    if let Some(error) = &listing.error {
        debug!(path = %suggestion.path, error, "path listing reported an error");
        return Contribution::default();
    }

    let root = suggestion.path.is_empty();
    let candidates = listing
        .files
        .iter()
        .filter(|file| file.name != "." && file.name != "..")
        .map(|file| {
            let value = if root {
                format!("/{}", file.name)
            } else {
                file.name.clone()
            };
            Candidate::weighted(value, &file.kind, weights::HDFS)
        })
        .collect();
    Contribution::completions(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hdfs_path_parts() {
        assert_eq!(hdfs_path_parts("'/user/ad"), vec!["user".to_string()]);
        assert_eq!(hdfs_path_parts("\"/"), Vec::<String>::new());
        assert_eq!(
            hdfs_path_parts("'/user/admin/"),
            vec!["user".to_string(), "admin".to_string()]
        );
        assert_eq!(hdfs_path_parts(""), Vec::<String>::new());
    }
}
