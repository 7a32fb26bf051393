//! Reference runtime over `serde_json` documents
//!
//! Validation semantics:
//! - Field types exactly match; no implicit coercion
//! - Format refiners parse for real (`chrono` dates/times, `uuid` tokens)
//! - `nullable` admits JSON null, nothing else extra
//! - A declared field may be absent only when it carries a default
//! - Only a strict object rejects undeclared keys
//!
//! JSON has no byte type, so `binary()` accepts any string here and
//! leaves stricter encodings to real runtime implementations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::expr::{DefaultLiteral, StringFormat};

use super::SchemaRuntime;

/// Validation failure with field-path context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path of the offending field, `$root` for the document itself
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl ValidationError {
    fn new(path: &str, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            path: label(path).to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    fn type_mismatch(path: &str, expected: &str, value: &Value) -> Self {
        Self::new(path, expected, json_type_name(value))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "validation failed at {}: expected {}, got {}",
            self.path, self.expected, self.actual
        )
    }
}

impl std::error::Error for ValidationError {}

/// A built validator over `serde_json::Value` documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    String {
        max: Option<u32>,
        format: Option<StringFormat>,
    },
    Number {
        int: bool,
    },
    Boolean,
    Unknown,
    Binary,
    Array(Box<Validator>),
    Record(Box<Validator>),
    Object {
        fields: Vec<(String, Validator)>,
        strict: bool,
    },
    Nullable(Box<Validator>),
    WithDefault(Box<Validator>, DefaultLiteral),
}

impl Validator {
    /// Validate a document against this schema value.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.check(value, "")
    }

    fn check(&self, value: &Value, path: &str) -> Result<(), ValidationError> {
        match self {
            Validator::Nullable(inner) => {
                if value.is_null() {
                    Ok(())
                } else {
                    inner.check(value, path)
                }
            }
            Validator::WithDefault(inner, _) => inner.check(value, path),
            Validator::String { max, format } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| ValidationError::type_mismatch(path, "string", value))?;
                if let Some(limit) = max {
                    let length = text.chars().count();
                    if length > *limit as usize {
                        return Err(ValidationError::new(
                            path,
                            format!("string of at most {} characters", limit),
                            format!("{} characters", length),
                        ));
                    }
                }
                if let Some(format) = format {
                    check_format(text, *format, path)?;
                }
                Ok(())
            }
            Validator::Number { int } => {
                if *int {
                    if !value.is_i64() && !value.is_u64() {
                        return Err(ValidationError::type_mismatch(path, "int", value));
                    }
                } else if !value.is_number() {
                    return Err(ValidationError::type_mismatch(path, "number", value));
                }
                Ok(())
            }
            Validator::Boolean => {
                if !value.is_boolean() {
                    return Err(ValidationError::type_mismatch(path, "bool", value));
                }
                Ok(())
            }
            Validator::Unknown => Ok(()),
            Validator::Binary => {
                if !value.is_string() {
                    return Err(ValidationError::type_mismatch(path, "binary string", value));
                }
                Ok(())
            }
            Validator::Array(element) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| ValidationError::type_mismatch(path, "array", value))?;
                for (i, item) in items.iter().enumerate() {
                    element.check(item, &format!("{}[{}]", label(path), i))?;
                }
                Ok(())
            }
            Validator::Record(entry) => {
                let map = value
                    .as_object()
                    .ok_or_else(|| ValidationError::type_mismatch(path, "object", value))?;
                for (key, item) in map {
                    entry.check(item, &join(path, key))?;
                }
                Ok(())
            }
            Validator::Object { fields, strict } => {
                let map = value
                    .as_object()
                    .ok_or_else(|| ValidationError::type_mismatch(path, "object", value))?;

                if *strict {
                    for key in map.keys() {
                        if !fields.iter().any(|(name, _)| name == key) {
                            return Err(ValidationError::new(
                                &join(path, key),
                                "declared field",
                                "undeclared field",
                            ));
                        }
                    }
                }

                for (name, field) in fields {
                    let field_path = join(path, name);
                    match map.get(name) {
                        Some(item) => field.check(item, &field_path)?,
                        // The default stands in for the absent field
                        None if field.has_default() => {}
                        None => {
                            return Err(ValidationError::new(
                                &field_path,
                                "present field",
                                "missing",
                            ));
                        }
                    }
                }
                Ok(())
            }
        }
    }

    fn has_default(&self) -> bool {
        matches!(self, Validator::WithDefault(_, _))
    }
}

fn check_format(text: &str, format: StringFormat, path: &str) -> Result<(), ValidationError> {
    let ok = match format {
        StringFormat::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok(),
        StringFormat::DateTime => {
            DateTime::parse_from_rfc3339(text).is_ok()
                || NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").is_ok()
        }
        StringFormat::Time => NaiveTime::parse_from_str(text, "%H:%M:%S%.f").is_ok(),
        StringFormat::Uuid => Uuid::parse_str(text).is_ok(),
    };
    if ok {
        Ok(())
    } else {
        let expected = match format {
            StringFormat::Date => "date string",
            StringFormat::DateTime => "datetime string",
            StringFormat::Time => "time string",
            StringFormat::Uuid => "uuid string",
        };
        Err(ValidationError::new(
            path,
            expected,
            format!("'{}'", text),
        ))
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn label(path: &str) -> &str {
    if path.is_empty() {
        "$root"
    } else {
        path
    }
}

fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// The in-crate reference runtime.
pub struct JsonRuntime;

impl SchemaRuntime for JsonRuntime {
    type Value = Validator;

    fn string(&self) -> Validator {
        Validator::String {
            max: None,
            format: None,
        }
    }

    fn number(&self) -> Validator {
        Validator::Number { int: false }
    }

    fn boolean(&self) -> Validator {
        Validator::Boolean
    }

    fn unknown(&self) -> Validator {
        Validator::Unknown
    }

    fn binary(&self) -> Validator {
        Validator::Binary
    }

    fn array(&self, element: Validator) -> Validator {
        Validator::Array(Box::new(element))
    }

    fn record(&self, value: Validator) -> Validator {
        Validator::Record(Box::new(value))
    }

    fn object(&self, fields: Vec<(String, Validator)>) -> Validator {
        Validator::Object {
            fields,
            strict: false,
        }
    }

    fn int(&self, value: Validator) -> Validator {
        match value {
            Validator::Number { .. } => Validator::Number { int: true },
            other => other,
        }
    }

    fn max_length(&self, value: Validator, limit: u32) -> Validator {
        match value {
            Validator::String { format, .. } => Validator::String {
                max: Some(limit),
                format,
            },
            other => other,
        }
    }

    fn date(&self, value: Validator) -> Validator {
        refine(value, StringFormat::Date)
    }

    fn datetime(&self, value: Validator) -> Validator {
        refine(value, StringFormat::DateTime)
    }

    fn time(&self, value: Validator) -> Validator {
        refine(value, StringFormat::Time)
    }

    fn uuid(&self, value: Validator) -> Validator {
        refine(value, StringFormat::Uuid)
    }

    fn nullable(&self, value: Validator) -> Validator {
        Validator::Nullable(Box::new(value))
    }

    fn with_default(&self, value: Validator, literal: &DefaultLiteral) -> Validator {
        Validator::WithDefault(Box::new(value), literal.clone())
    }

    fn strict(&self, value: Validator) -> Validator {
        match value {
            Validator::Object { fields, .. } => Validator::Object {
                fields,
                strict: true,
            },
            other => other,
        }
    }

    fn passthrough(&self, value: Validator) -> Validator {
        match value {
            Validator::Object { fields, .. } => Validator::Object {
                fields,
                strict: false,
            },
            other => other,
        }
    }
}

fn refine(value: Validator, format: StringFormat) -> Validator {
    match value {
        Validator::String { max, .. } => Validator::String {
            max,
            format: Some(format),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn runtime() -> JsonRuntime {
        JsonRuntime
    }

    #[test]
    fn test_exact_type_match_no_coercion() {
        let validator = runtime().string();
        assert!(validator.validate(&json!("text")).is_ok());
        let err = validator.validate(&json!(42)).unwrap_err();
        assert_eq!(err.path, "$root");
        assert_eq!(err.expected, "string");
        assert_eq!(err.actual, "int");
    }

    #[test]
    fn test_int_rejects_float() {
        let r = runtime();
        let validator = r.int(r.number());
        assert!(validator.validate(&json!(3)).is_ok());
        assert!(validator.validate(&json!(3.5)).is_err());

        // Unrestricted number accepts both
        assert!(r.number().validate(&json!(3)).is_ok());
        assert!(r.number().validate(&json!(3.5)).is_ok());
    }

    #[test]
    fn test_max_length_counts_chars() {
        let r = runtime();
        let validator = r.max_length(r.string(), 3);
        assert!(validator.validate(&json!("abc")).is_ok());
        let err = validator.validate(&json!("abcd")).unwrap_err();
        assert!(err.expected.contains("at most 3"));
    }

    #[test]
    fn test_format_refiners_parse_for_real() {
        let r = runtime();
        let date = r.date(r.string());
        assert!(date.validate(&json!("2024-02-29")).is_ok());
        assert!(date.validate(&json!("2023-02-29")).is_err());
        assert!(date.validate(&json!("not a date")).is_err());

        let datetime = r.datetime(r.string());
        assert!(datetime.validate(&json!("2024-01-15T10:30:00Z")).is_ok());
        assert!(datetime.validate(&json!("2024-01-15 10:30:00")).is_ok());
        assert!(datetime.validate(&json!("yesterday")).is_err());

        let time = r.time(r.string());
        assert!(time.validate(&json!("23:59:59")).is_ok());
        assert!(time.validate(&json!("25:00:00")).is_err());

        let uuid = r.uuid(r.string());
        assert!(uuid
            .validate(&json!("550e8400-e29b-41d4-a716-446655440000"))
            .is_ok());
        assert!(uuid.validate(&json!("not-a-uuid")).is_err());
    }

    #[test]
    fn test_nullable_admits_null_only_extra() {
        let r = runtime();
        let validator = r.nullable(r.boolean());
        assert!(validator.validate(&json!(null)).is_ok());
        assert!(validator.validate(&json!(true)).is_ok());
        assert!(validator.validate(&json!("true")).is_err());

        // Without the decorator, null is a mismatch
        assert!(r.boolean().validate(&json!(null)).is_err());
    }

    #[test]
    fn test_array_elements_path_tagged() {
        let r = runtime();
        let validator = r.array(r.string());
        assert!(validator.validate(&json!(["a", "b"])).is_ok());
        let err = validator.validate(&json!(["a", 1, "c"])).unwrap_err();
        assert_eq!(err.path, "$root[1]");
    }

    #[test]
    fn test_record_validates_every_value() {
        let r = runtime();
        let validator = r.record(r.number());
        assert!(validator.validate(&json!({"a": 1, "b": 2.5})).is_ok());
        let err = validator.validate(&json!({"a": 1, "b": "x"})).unwrap_err();
        assert_eq!(err.path, "b");
    }

    #[test]
    fn test_strict_object_rejects_undeclared() {
        let r = runtime();
        let validator = r.strict(r.object(vec![("id".into(), r.int(r.number()))]));
        assert!(validator.validate(&json!({"id": 1})).is_ok());
        let err = validator.validate(&json!({"id": 1, "extra": true})).unwrap_err();
        assert_eq!(err.path, "extra");
        assert_eq!(err.actual, "undeclared field");
    }

    #[test]
    fn test_passthrough_object_admits_undeclared() {
        let r = runtime();
        let validator = r.passthrough(r.object(vec![("id".into(), r.int(r.number()))]));
        assert!(validator.validate(&json!({"id": 1, "extra": true})).is_ok());
    }

    #[test]
    fn test_default_stands_in_for_absent_field() {
        let r = runtime();
        let status = r.with_default(r.string(), &DefaultLiteral::Str("active".into()));
        let validator = r.strict(r.object(vec![
            ("id".into(), r.int(r.number())),
            ("status".into(), status),
        ]));

        assert!(validator.validate(&json!({"id": 1})).is_ok());
        assert!(validator.validate(&json!({"id": 1, "status": "idle"})).is_ok());

        // Absent field without a default is missing
        let err = validator.validate(&json!({"status": "idle"})).unwrap_err();
        assert_eq!(err.path, "id");
        assert_eq!(err.actual, "missing");
    }

    #[test]
    fn test_nested_paths_dotted() {
        let r = runtime();
        let address = r.object(vec![("city".into(), r.string())]);
        let validator = r.strict(r.object(vec![("address".into(), address)]));
        let err = validator
            .validate(&json!({"address": {"city": 7}}))
            .unwrap_err();
        assert_eq!(err.path, "address.city");
    }

    #[test]
    fn test_unknown_accepts_anything() {
        let validator = runtime().unknown();
        for value in [json!(null), json!(1), json!("x"), json!({"a": []})] {
            assert!(validator.validate(&value).is_ok());
        }
    }

    #[test]
    fn test_binary_accepts_any_string() {
        let validator = runtime().binary();
        assert!(validator.validate(&json!("deadbeef")).is_ok());
        assert!(validator.validate(&json!(123)).is_err());
    }
}
