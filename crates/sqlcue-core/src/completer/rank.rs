//! Ranking: column qualification, global ordering and scoring

use std::cmp::Ordering;

use super::candidate::{Candidate, ColumnCandidate, CompletionItem};

/// Score of the best candidate; each following candidate gets one less
pub const TOP_SCORE: i32 = 1000;

/// Qualify column suggestions with their table.
///
/// Columns are sorted by value. Two neighbors with the same value are both
/// prefixed with their table's alias (or table name). Every column of an
/// aliased table is then prefixed with the alias unless its value already
/// starts with it, whether or not it was a duplicate.
pub(super) fn qualify_columns(columns: &mut [ColumnCandidate<'_>]) {
    columns.sort_by(|a, b| a.value.cmp(&b.value));

    for i in 0..columns.len() {
        if i + 1 < columns.len() && columns[i].value == columns[i + 1].value {
            for j in [i, i + 1] {
                let column = &mut columns[j];
                column.value = format!("{}.{}", column.table.qualifier(), column.value);
            }
        }

        let column = &mut columns[i];
        if let Some(alias) = column.table.alias.as_deref() {
            if !column.value.starts_with(alias) {
                column.value = format!("{alias}.{}", column.value);
            }
        }
    }
}

/// Weighted candidates first by descending weight, then unweighted ones;
/// ties broken by value
pub(super) fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    match (a.weight, b.weight) {
        (Some(wa), Some(wb)) if wa != wb => wb.cmp(&wa),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => a.value.cmp(&b.value),
    }
}

/// Sort and assign strictly descending scores
pub(super) fn finalize(mut candidates: Vec<Candidate>) -> Vec<CompletionItem> {
    candidates.sort_by(compare_candidates);
    let mut score = TOP_SCORE;
    candidates
        .into_iter()
        .map(|candidate| {
            let item = CompletionItem {
                value: candidate.value,
                meta: candidate.meta,
                weight: candidate.weight,
                score,
                prioritize_score: true,
            };
            score -= 1;
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_result::TableReference;
    use pretty_assertions::assert_eq;

    fn values(columns: &[ColumnCandidate<'_>]) -> Vec<String> {
        columns.iter().map(|c| c.value.clone()).collect()
    }

    #[test]
    fn test_duplicates_qualified_by_alias_or_table() {
        let orders = TableReference::table("orders");
        let customers = TableReference::table("customers").with_alias("c");
        let mut columns = vec![
            ColumnCandidate::new("id", "int", &orders),
            ColumnCandidate::new("total", "double", &orders),
            ColumnCandidate::new("id", "int", &customers),
        ];

        qualify_columns(&mut columns);

        assert_eq!(values(&columns), vec!["orders.id", "c.id", "total"]);
    }

    #[test]
    fn test_aliased_columns_always_qualified() {
        let orders = TableReference::table("orders").with_alias("o");
        let mut columns = vec![
            ColumnCandidate::new("total", "double", &orders),
            ColumnCandidate::new("amount", "double", &orders),
        ];

        qualify_columns(&mut columns);

        assert_eq!(values(&columns), vec!["o.amount", "o.total"]);
    }

    #[test]
    fn test_value_starting_with_alias_is_left_alone() {
        let orders = TableReference::table("orders").with_alias("o");
        let mut columns = vec![ColumnCandidate::new("order_id", "int", &orders)];

        qualify_columns(&mut columns);

        assert_eq!(values(&columns), vec!["order_id"]);
    }

    #[test]
    fn test_weighted_before_unweighted() {
        let items = finalize(vec![
            Candidate::new("upper()", "string", None),
            Candidate::weighted("SELECT", "keyword", 10),
            Candidate::new("abs()", "double", None),
            Candidate::weighted("orders", "table", 200),
            Candidate::weighted("FROM", "keyword", 10),
        ]);

        let ordered: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(ordered, vec!["orders", "FROM", "SELECT", "abs()", "upper()"]);

        let scores: Vec<i32> = items.iter().map(|i| i.score).collect();
        assert_eq!(scores, vec![1000, 999, 998, 997, 996]);
        assert!(items.iter().all(|i| i.prioritize_score));
    }

    #[test]
    fn test_negative_weight_still_ranks_before_unweighted() {
        let items = finalize(vec![
            Candidate::new("abs()", "double", None),
            Candidate::weighted("NOT", "keyword", -1),
        ]);
        assert_eq!(items[0].value, "NOT");
    }
}
