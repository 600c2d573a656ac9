//! Column expander - lists the columns a table reference contributes

use tracing::debug;

use super::candidate::ColumnCandidate;
use super::column_reference::fetch_identifier_chain;
use super::BranchContext;
use crate::metadata::FieldDescriptor;
use crate::parse_result::{SubQuery, TableReference, COLREF_TYPE};
use crate::types::ANY_TYPE;

/// Deepest sub-query nesting followed when expanding projections
const MAX_SUB_QUERY_DEPTH: usize = 32;

/// Columns of one table reference that fit the requested types
pub(super) async fn table_columns<'a>(
    ctx: &BranchContext<'a>,
    table: &'a TableReference,
    types: &[String],
) -> Vec<ColumnCandidate<'a>> {
    if let (Some(alias), None) = (&table.sub_query, &table.identifier_chain) {
        return sub_query_columns(ctx, table, alias);
    }

    let Some(table_name) = table.table.as_deref() else {
        debug!(?table, "table reference without a table name");
        return Vec::new();
    };
    let database = table.database.as_deref().unwrap_or(ctx.database);
    let chain = table.identifier_chain.as_deref().unwrap_or_default();

    match fetch_identifier_chain(ctx, database, table_name, chain).await {
        Ok(descriptor) => expand_descriptor(ctx, table, &descriptor, types),
        Err(err) => {
            debug!(table = table_name, error = %err, "column fetch failed");
            Vec::new()
        }
    }
}

fn locate_sub_query<'q>(sub_queries: &'q [SubQuery], alias: &str) -> Option<&'q SubQuery> {
    sub_queries.iter().find(|s| s.alias == alias)
}

/// Projected columns of a sub-query in scope; never fetches
fn sub_query_columns<'a>(
    ctx: &BranchContext<'a>,
    table: &'a TableReference,
    alias: &str,
) -> Vec<ColumnCandidate<'a>> {
    let mut columns = Vec::new();
    match locate_sub_query(ctx.sub_queries, alias) {
        Some(sub_query) => collect_projection(ctx, table, sub_query, 0, &mut columns),
        None => debug!(alias, "sub-query not in scope"),
    }
    columns
}

fn collect_projection<'a>(
    ctx: &BranchContext<'a>,
    table: &'a TableReference,
    sub_query: &SubQuery,
    depth: usize,
    columns: &mut Vec<ColumnCandidate<'a>>,
) {
    if depth > MAX_SUB_QUERY_DEPTH {
        debug!(alias = %sub_query.alias, "sub-query nesting too deep");
        return;
    }

    for column in &sub_query.columns {
        if column.alias.is_some() || column.identifier_chain.is_some() {
            let meta = match column.data_type.as_deref() {
                Some(data_type) if data_type != COLREF_TYPE => data_type,
                _ => ANY_TYPE,
            };
            if let Some(alias) = &column.alias {
                columns.push(ColumnCandidate::new(ctx.quote(alias), meta, table));
            } else if let Some([single]) = column.identifier_chain.as_deref() {
                columns.push(ColumnCandidate::new(ctx.quote(&single.name), meta, table));
            }
        } else if let Some(nested_alias) = &column.sub_query {
            if let Some(nested) = locate_sub_query(&sub_query.sub_queries, nested_alias) {
                collect_projection(ctx, table, nested, depth + 1, columns);
            }
        }
    }
}

/// Turn a fetched table or field descriptor into column candidates
fn expand_descriptor<'a>(
    ctx: &BranchContext<'a>,
    table: &'a TableReference,
    descriptor: &FieldDescriptor,
    types: &[String],
) -> Vec<ColumnCandidate<'a>> {
    let suffix = ctx.dialect.complex_suffix();
    let fits = |data_type: &str| {
        ctx.functions
            .matches_either_way(ctx.dialect, types, &[data_type.to_uppercase()])
    };

    let mut columns = Vec::new();
    let mut push = |value: String, meta: &str| {
        columns.push(ColumnCandidate::new(value, meta, table));
    };

    if let Some(extended) = &descriptor.extended_columns {
        for column in extended {
            let name = ctx.quote(&column.name);
            let data_type = column.data_type.as_str();
            if data_type.starts_with("map") {
                push(format!("{name}{suffix}"), "map");
            } else if data_type.starts_with("struct") {
                push(name, "struct");
            } else if data_type.starts_with("array") {
                push(format!("{name}{suffix}"), "array");
            } else if fits(data_type) {
                push(name, data_type);
            }
        }
    } else if let Some(plain) = &descriptor.columns {
        for column in plain {
            push(ctx.quote(column), "column");
        }
    }

    if descriptor.is_type("map") && ctx.dialect.has_map_accessors() {
        push("key".to_string(), "key");
        push("value".to_string(), "value");
    }

    if descriptor.is_type("struct") {
        for field in descriptor.fields.iter().flatten() {
            push(ctx.quote(&field.name), &field.data_type);
        }
    } else if descriptor.is_type("map") {
        let value_fields = FieldDescriptor::nested_fields(descriptor.value.as_deref());
        for field in value_fields.into_iter().flatten() {
            if fits(&field.data_type) {
                push(ctx.quote(&field.name), &field.data_type);
            }
        }
    } else if descriptor.is_type("array") {
        let item_fields = FieldDescriptor::nested_fields(descriptor.item.as_deref());
        for field in item_fields.into_iter().flatten() {
            if field.data_type == "array" || field.data_type == "map" {
                push(
                    format!("{}{suffix}", ctx.quote(&field.name)),
                    &field.data_type,
                );
            } else if fits(&field.data_type) {
                push(ctx.quote(&field.name), &field.data_type);
            }
        }
    }

    columns
}
