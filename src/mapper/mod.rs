//! Column type mapping
//!
//! Turns one column descriptor into one schema expression: classify the
//! base type token, lower the class into the target vocabulary, resolve
//! structured-payload overrides, then decorate. Decoration order is fixed:
//! nullable first, default second.

mod classify;
mod defaults;

pub use classify::{classify, DocumentKind, TypeClass};
pub use defaults::{normalize_default, Normalized};

use crate::errors::{SchemaGenError, SchemaGenResult};
use crate::expr::{SchemaExpr, StringFormat};
use crate::metadata::Column;
use crate::patterns;

/// Per-column override context for structured-document columns.
///
/// A literal override wins over a pattern reference; both are ignored for
/// non-document columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverrideContext<'a> {
    /// Verbatim expression text, used as-is
    pub literal: Option<&'a str>,
    /// Pattern library entry name
    pub pattern: Option<&'a str>,
}

impl<'a> OverrideContext<'a> {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Map a column descriptor to its schema expression, classifying the
/// descriptor's own base type.
pub fn map_column(column: &Column, ctx: &OverrideContext<'_>) -> SchemaGenResult<SchemaExpr> {
    map_column_expr(&column.base_type, column, ctx)
}

/// Map with an explicit base type token (the descriptor supplies
/// nullability, length bound, and default).
pub fn map_column_expr(
    base_type: &str,
    column: &Column,
    ctx: &OverrideContext<'_>,
) -> SchemaGenResult<SchemaExpr> {
    let class = classify(base_type);
    let mut expr = lower(&class, column.max_length, ctx)?;

    if column.nullable {
        expr = SchemaExpr::Nullable(Box::new(expr));
    }
    if let Some(raw) = &column.default_value {
        if let Normalized::Literal(literal) = normalize_default(raw) {
            expr = SchemaExpr::WithDefault(Box::new(expr), literal);
        }
    }
    Ok(expr)
}

/// Public text form of the mapping, one column at a time.
pub fn map_column_type(
    base_type: &str,
    column: &Column,
    ctx: Option<&OverrideContext<'_>>,
) -> SchemaGenResult<String> {
    let default_ctx = OverrideContext::none();
    let expr = map_column_expr(base_type, column, ctx.unwrap_or(&default_ctx))?;
    Ok(expr.to_string())
}

/// Lower a classification into the target vocabulary.
///
/// `max_length` applies only to bounded strings and never propagates into
/// array elements.
fn lower(
    class: &TypeClass,
    max_length: Option<u32>,
    ctx: &OverrideContext<'_>,
) -> SchemaGenResult<SchemaExpr> {
    let expr = match class {
        TypeClass::BoundedString => SchemaExpr::String {
            max: max_length,
            format: None,
        },
        TypeClass::UnboundedString | TypeClass::Enumerated => SchemaExpr::string(),
        TypeClass::Integer => SchemaExpr::integer(),
        TypeClass::Real => SchemaExpr::number(),
        TypeClass::Boolean => SchemaExpr::Boolean,
        TypeClass::Date => SchemaExpr::formatted_string(StringFormat::Date),
        TypeClass::Timestamp => SchemaExpr::formatted_string(StringFormat::DateTime),
        TypeClass::Time => SchemaExpr::formatted_string(StringFormat::Time),
        TypeClass::Identifier => SchemaExpr::formatted_string(StringFormat::Uuid),
        TypeClass::Binary => SchemaExpr::Binary,
        TypeClass::Unknown => SchemaExpr::Unknown,
        TypeClass::Document(_) => {
            if let Some(text) = ctx.literal {
                SchemaExpr::Verbatim(text.to_string())
            } else if let Some(name) = ctx.pattern {
                patterns::resolve(name, None)?
            } else {
                SchemaExpr::Unknown
            }
        }
        TypeClass::ArrayOf(element) => {
            let inner = lower(element, None, &OverrideContext::none())?;
            SchemaExpr::Array(Box::new(inner))
        }
    };
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_column() {
        let col = Column::new("id", "integer");
        let text = map_column_type("integer", &col, None).unwrap();
        assert_eq!(text, "number().int()");
    }

    #[test]
    fn test_bounded_string_honors_explicit_max() {
        let col = Column::new("name", "varchar").with_max_length(255);
        let expr = map_column(&col, &OverrideContext::none()).unwrap();
        assert_eq!(expr.to_string(), "string().max(255)");
    }

    #[test]
    fn test_parsed_suffix_alone_does_not_bound() {
        // Only the explicit descriptor field bounds; the parenthesized
        // suffix is stripped and ignored
        let col = Column::new("name", "varchar(255)");
        let expr = map_column(&col, &OverrideContext::none()).unwrap();
        assert_eq!(expr.to_string(), "string()");
    }

    #[test]
    fn test_nullable_then_default_decoration() {
        let col = Column::new("status", "varchar")
            .nullable()
            .with_default("'active'");
        let expr = map_column(&col, &OverrideContext::none()).unwrap();
        assert_eq!(expr.to_string(), "string().nullable().default('active')");
    }

    #[test]
    fn test_skipped_default_leaves_no_decorator() {
        let col = Column::new("created_at", "timestamp").with_default("now()");
        let expr = map_column(&col, &OverrideContext::none()).unwrap();
        assert_eq!(expr.to_string(), "string().datetime()");
    }

    #[test]
    fn test_document_defaults_to_unknown() {
        let col = Column::new("payload", "jsonb");
        let expr = map_column(&col, &OverrideContext::none()).unwrap();
        assert_eq!(expr.to_string(), "unknown()");
    }

    #[test]
    fn test_literal_override_beats_pattern() {
        let col = Column::new("profile", "jsonb");
        let ctx = OverrideContext {
            literal: Some("record(string())"),
            pattern: Some("metadata"),
        };
        let expr = map_column(&col, &ctx).unwrap();
        assert_eq!(expr.to_string(), "record(string())");
    }

    #[test]
    fn test_pattern_reference_resolves() {
        let col = Column::new("tags", "jsonb");
        let ctx = OverrideContext {
            literal: None,
            pattern: Some("tags"),
        };
        let expr = map_column(&col, &ctx).unwrap();
        assert_eq!(expr.to_string(), "array(string())");
    }

    #[test]
    fn test_unknown_pattern_is_configuration_error() {
        let col = Column::new("profile", "jsonb");
        let ctx = OverrideContext {
            literal: None,
            pattern: Some("no-such-pattern"),
        };
        let err = map_column(&col, &ctx).unwrap_err();
        assert_eq!(err.code(), "VET_CONFIGURATION");
        assert!(err.to_string().contains("no-such-pattern"));
    }

    #[test]
    fn test_overrides_ignored_for_plain_columns() {
        let col = Column::new("name", "text");
        let ctx = OverrideContext {
            literal: Some("boolean()"),
            pattern: None,
        };
        let expr = map_column(&col, &ctx).unwrap();
        assert_eq!(expr.to_string(), "string()");
    }

    #[test]
    fn test_array_elements_drop_length_bound() {
        let col = Column::new("labels", "varchar[]").with_max_length(64);
        let expr = map_column(&col, &OverrideContext::none()).unwrap();
        assert_eq!(expr.to_string(), "array(string())");
    }

    #[test]
    fn test_uuid_and_temporal_refiners() {
        let col = Column::new("id", "uuid");
        assert_eq!(
            map_column(&col, &OverrideContext::none()).unwrap().to_string(),
            "string().uuid()"
        );
        let col = Column::new("on_date", "date");
        assert_eq!(
            map_column(&col, &OverrideContext::none()).unwrap().to_string(),
            "string().date()"
        );
        let col = Column::new("at_time", "time");
        assert_eq!(
            map_column(&col, &OverrideContext::none()).unwrap().to_string(),
            "string().time()"
        );
    }

    #[test]
    fn test_unrecognized_token_degrades() {
        let col = Column::new("geom", "geometry(Point,4326)");
        // Paren suffix here is not a pure precision suffix, token stays odd
        let expr = map_column(&col, &OverrideContext::none()).unwrap();
        assert_eq!(expr.to_string(), "unknown()");
    }
}
