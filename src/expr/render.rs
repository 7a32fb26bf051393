//! Deterministic rendering of schema expressions
//!
//! Output is single-line, `", "`-joined, with bare keys where the column
//! name is identifier-shaped and single-quoted keys otherwise. Identical
//! trees render to byte-identical text.

use std::fmt;

use super::ast::{DefaultLiteral, ObjectMode, SchemaExpr, StringFormat};

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StringFormat::Date => "date",
            StringFormat::DateTime => "datetime",
            StringFormat::Time => "time",
            StringFormat::Uuid => "uuid",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for DefaultLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultLiteral::Str(s) => write!(f, "'{}'", escape_single_quoted(s)),
            DefaultLiteral::Num(raw) => write!(f, "{}", raw),
            DefaultLiteral::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl fmt::Display for SchemaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaExpr::String { max, format } => {
                write!(f, "string()")?;
                if let Some(fmt_refiner) = format {
                    write!(f, ".{}()", fmt_refiner)?;
                }
                if let Some(limit) = max {
                    write!(f, ".max({})", limit)?;
                }
                Ok(())
            }
            SchemaExpr::Number { int } => {
                write!(f, "number()")?;
                if *int {
                    write!(f, ".int()")?;
                }
                Ok(())
            }
            SchemaExpr::Boolean => write!(f, "boolean()"),
            SchemaExpr::Unknown => write!(f, "unknown()"),
            SchemaExpr::Binary => write!(f, "binary()"),
            SchemaExpr::Array(element) => write!(f, "array({})", element),
            SchemaExpr::Record(value) => write!(f, "record({})", value),
            SchemaExpr::Object { fields, mode } => {
                if fields.is_empty() {
                    write!(f, "object({{}})")?;
                } else {
                    write!(f, "object({{ ")?;
                    for (i, (name, expr)) in fields.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write_key(f, name)?;
                        write!(f, ": {}", expr)?;
                    }
                    write!(f, " }})")?;
                }
                match mode {
                    Some(ObjectMode::Strict) => write!(f, ".strict()"),
                    Some(ObjectMode::Passthrough) => write!(f, ".passthrough()"),
                    None => Ok(()),
                }
            }
            SchemaExpr::Verbatim(text) => write!(f, "{}", text),
            SchemaExpr::Nullable(inner) => write!(f, "{}.nullable()", inner),
            SchemaExpr::WithDefault(inner, literal) => {
                write!(f, "{}.default({})", inner, literal)
            }
        }
    }
}

/// Bare key when identifier-shaped, single-quoted otherwise
fn write_key(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_bare_key(name) {
        write!(f, "{}", name)
    } else {
        write!(f, "'{}'", escape_single_quoted(name))
    }
}

pub(super) fn is_bare_key(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::ast::*;
    use super::*;

    #[test]
    fn test_base_validators() {
        assert_eq!(SchemaExpr::string().to_string(), "string()");
        assert_eq!(SchemaExpr::integer().to_string(), "number().int()");
        assert_eq!(SchemaExpr::number().to_string(), "number()");
        assert_eq!(SchemaExpr::Boolean.to_string(), "boolean()");
        assert_eq!(SchemaExpr::Unknown.to_string(), "unknown()");
        assert_eq!(SchemaExpr::Binary.to_string(), "binary()");
    }

    #[test]
    fn test_string_refinements() {
        let expr = SchemaExpr::String {
            max: Some(255),
            format: None,
        };
        assert_eq!(expr.to_string(), "string().max(255)");

        let expr = SchemaExpr::formatted_string(StringFormat::DateTime);
        assert_eq!(expr.to_string(), "string().datetime()");

        let expr = SchemaExpr::formatted_string(StringFormat::Uuid);
        assert_eq!(expr.to_string(), "string().uuid()");
    }

    #[test]
    fn test_decoration_order_nullable_before_default() {
        let expr = SchemaExpr::WithDefault(
            Box::new(SchemaExpr::string().nullable()),
            DefaultLiteral::Str("x".into()),
        );
        assert_eq!(expr.to_string(), "string().nullable().default('x')");
    }

    #[test]
    fn test_default_literals() {
        let expr = SchemaExpr::WithDefault(
            Box::new(SchemaExpr::Boolean),
            DefaultLiteral::Bool(true),
        );
        assert_eq!(expr.to_string(), "boolean().default(true)");

        let expr = SchemaExpr::WithDefault(
            Box::new(SchemaExpr::integer()),
            DefaultLiteral::Num("42".into()),
        );
        assert_eq!(expr.to_string(), "number().int().default(42)");

        let expr = SchemaExpr::WithDefault(
            Box::new(SchemaExpr::string()),
            DefaultLiteral::Str("it's".into()),
        );
        assert_eq!(expr.to_string(), "string().default('it\\'s')");
    }

    #[test]
    fn test_array_and_record() {
        let expr = SchemaExpr::Array(Box::new(SchemaExpr::string()));
        assert_eq!(expr.to_string(), "array(string())");

        let expr = SchemaExpr::Record(Box::new(SchemaExpr::Unknown));
        assert_eq!(expr.to_string(), "record(unknown())");
    }

    #[test]
    fn test_object_modes() {
        let obj = SchemaExpr::Object {
            fields: vec![
                ("id".into(), SchemaExpr::integer()),
                ("name".into(), SchemaExpr::string()),
            ],
            mode: Some(ObjectMode::Strict),
        };
        assert_eq!(
            obj.to_string(),
            "object({ id: number().int(), name: string() }).strict()"
        );

        let obj = SchemaExpr::Object {
            fields: vec![],
            mode: Some(ObjectMode::Passthrough),
        };
        assert_eq!(obj.to_string(), "object({}).passthrough()");
    }

    #[test]
    fn test_non_identifier_key_is_quoted() {
        let obj = SchemaExpr::Object {
            fields: vec![("weird name".into(), SchemaExpr::string())],
            mode: None,
        };
        assert_eq!(obj.to_string(), "object({ 'weird name': string() })");
    }

    #[test]
    fn test_verbatim_passthrough() {
        let expr = SchemaExpr::Verbatim("record(number())".into()).nullable();
        assert_eq!(expr.to_string(), "record(number()).nullable()");
    }
}
