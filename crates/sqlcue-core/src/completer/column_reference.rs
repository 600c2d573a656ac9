//! Column reference resolver - resolves dotted identifier chains to types

use tracing::{debug, trace};

use super::BranchContext;
use crate::error::MetadataError;
use crate::metadata::{FieldDescriptor, FieldRequest};
use crate::parse_result::{ColumnReferenceRequest, Identifier};
use crate::types::ANY_TYPE;

/// Synthetic accessor of an array element
const ARRAY_ITEM: &str = "item";
/// Synthetic accessor of a map value
const MAP_VALUE: &str = "value";

/// Resolved type of an identifier chain
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReference {
    pub data_type: String,
    pub sample: Vec<serde_json::Value>,
}

impl ColumnReference {
    /// Wildcard reference used when the type cannot be known
    pub fn any() -> Self {
        Self {
            data_type: ANY_TYPE.to_string(),
            sample: Vec::new(),
        }
    }

    fn from_descriptor(descriptor: FieldDescriptor) -> Self {
        Self {
            data_type: descriptor
                .data_type
                .unwrap_or_else(|| ANY_TYPE.to_string()),
            sample: descriptor.sample.unwrap_or_default(),
        }
    }

    /// Type list for catalog lookups, e.g. `["INT"]`
    pub fn type_constraint(&self) -> Vec<String> {
        vec![self.data_type.to_uppercase()]
    }
}

/// Resolve the parser's column reference, if any.
///
/// A chain containing a bound variable resolves to the wildcard type without
/// a fetch; a failed fetch resolves to `None`.
pub(super) async fn resolve_column_reference(
    ctx: &BranchContext<'_>,
    request: Option<&ColumnReferenceRequest>,
) -> Option<ColumnReference> {
    let request = request?;
    if request.references_variable() {
        return Some(ColumnReference::any());
    }

    let database = request.database.as_deref().unwrap_or(ctx.database);
    match fetch_identifier_chain(ctx, database, &request.table, &request.identifier_chain).await {
        Ok(descriptor) => Some(ColumnReference::from_descriptor(descriptor)),
        Err(err) => {
            debug!(table = %request.table, error = %err, "column reference unresolved");
            None
        }
    }
}

fn is_accessor(segment: &Identifier) -> bool {
    segment.name == ARRAY_ITEM || segment.name == MAP_VALUE
}

/// Fetch the descriptor at the end of `chain`, one segment per round trip.
///
/// The fetched path grows by one chain segment per step. An `item`/`value`
/// segment the parser already placed after it is taken in the same step.
/// When more segments remain, an array or map result gets the synthetic
/// `item`/`value` accessor appended before the next fetch, so `a.b` over a
/// map column `a` is fetched as `a.value.b`.
pub(super) async fn fetch_identifier_chain(
    ctx: &BranchContext<'_>,
    database: &str,
    table: &str,
    chain: &[Identifier],
) -> Result<FieldDescriptor, MetadataError> {
    let mut fetched: Vec<String> = Vec::with_capacity(chain.len() + 2);
    let mut next = 0;

    loop {
        if let Some(segment) = chain.get(next) {
            fetched.push(segment.name.clone());
            next += 1;
        }
        if let Some(segment) = chain.get(next).filter(|s| is_accessor(s)) {
            fetched.push(segment.name.clone());
            next += 1;
        }

        trace!(database, table, path = ?fetched, "fetching fields");
        let descriptor = ctx
            .metadata
            .fetch_fields(FieldRequest {
                dialect: ctx.dialect,
                database,
                table,
                fields: &fetched,
                timeout: ctx.timeout,
            })
            .await?;

        if next >= chain.len() {
            return Ok(descriptor);
        }
        if descriptor.is_type("array") {
            fetched.push(ARRAY_ITEM.to_string());
        } else if descriptor.is_type("map") {
            fetched.push(MAP_VALUE.to_string());
        }
    }
}
