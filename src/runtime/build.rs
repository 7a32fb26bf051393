//! Live schema construction
//!
//! Folds an assembled [`SchemaExpr`] into runtime constructor calls.
//! Caller-supplied override text is parsed against the fixed expression
//! grammar before folding; text outside the grammar is an evaluation
//! error, so arbitrary code can never reach a runtime.

use crate::assembler::{assemble, MappingOptions};
use crate::errors::{SchemaGenError, SchemaGenResult};
use crate::expr::{self, ObjectMode, SchemaExpr};
use crate::metadata::MetadataProvider;
use crate::observability::Logger;

use super::SchemaRuntime;

/// Build a live schema value for `table` against `runtime`.
pub fn generate_schema_value<P, R>(
    provider: &P,
    table: &str,
    runtime: &R,
    options: &MappingOptions,
) -> SchemaGenResult<R::Value>
where
    P: MetadataProvider + ?Sized,
    R: SchemaRuntime + ?Sized,
{
    let expr = assemble(provider, table, options)?;
    let value = build_value(&expr, runtime, table)?;
    Logger::info("SCHEMA_BUILT", &[("table", table)]);
    Ok(value)
}

/// Fold one expression tree into runtime calls.
///
/// `table` is carried for evaluation-error context only.
pub fn build_value<R: SchemaRuntime + ?Sized>(
    expr: &SchemaExpr,
    runtime: &R,
    table: &str,
) -> SchemaGenResult<R::Value> {
    let value = match expr {
        SchemaExpr::String { max, format } => {
            let mut value = runtime.string();
            if let Some(format) = format {
                value = match format {
                    expr::StringFormat::Date => runtime.date(value),
                    expr::StringFormat::DateTime => runtime.datetime(value),
                    expr::StringFormat::Time => runtime.time(value),
                    expr::StringFormat::Uuid => runtime.uuid(value),
                };
            }
            if let Some(limit) = max {
                value = runtime.max_length(value, *limit);
            }
            value
        }
        SchemaExpr::Number { int } => {
            let value = runtime.number();
            if *int {
                runtime.int(value)
            } else {
                value
            }
        }
        SchemaExpr::Boolean => runtime.boolean(),
        SchemaExpr::Unknown => runtime.unknown(),
        SchemaExpr::Binary => runtime.binary(),
        SchemaExpr::Array(element) => {
            let element = build_value(element, runtime, table)?;
            runtime.array(element)
        }
        SchemaExpr::Record(value) => {
            let value = build_value(value, runtime, table)?;
            runtime.record(value)
        }
        SchemaExpr::Object { fields, mode } => {
            let mut built = Vec::with_capacity(fields.len());
            for (name, field) in fields {
                built.push((name.clone(), build_value(field, runtime, table)?));
            }
            let value = runtime.object(built);
            match mode {
                Some(ObjectMode::Strict) => runtime.strict(value),
                Some(ObjectMode::Passthrough) => runtime.passthrough(value),
                None => value,
            }
        }
        SchemaExpr::Verbatim(text) => {
            let parsed = expr::parse(text).map_err(|e| SchemaGenError::Evaluation {
                table: table.to_string(),
                reason: format!("override '{}' does not parse: {}", text, e),
            })?;
            build_value(&parsed, runtime, table)?
        }
        SchemaExpr::Nullable(inner) => {
            let inner = build_value(inner, runtime, table)?;
            runtime.nullable(inner)
        }
        SchemaExpr::WithDefault(inner, literal) => {
            let inner = build_value(inner, runtime, table)?;
            runtime.with_default(inner, literal)
        }
    };
    Ok(value)
}
