//! Schema expression tree
//!
//! Decoration order is structural: `Nullable` wraps the base expression,
//! `WithDefault` wraps `Nullable`. The renderer and the live builder both
//! walk this tree, so text output and direct construction cannot drift
//! apart.

use serde::{Deserialize, Serialize};

/// Format refiner applied to a string validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringFormat {
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// Timestamp with or without zone
    DateTime,
    /// Time of day
    Time,
    /// UUID-shaped identifier token
    Uuid,
}

/// Closed vs open object mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectMode {
    /// Undeclared fields are rejected
    Strict,
    /// Undeclared fields pass through
    Passthrough,
}

/// Normalized default literal carried by a `.default(...)` decorator.
///
/// Numeric defaults keep their catalog spelling so repeated generation is
/// byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultLiteral {
    Str(String),
    Num(String),
    Bool(bool),
}

/// One column's validator expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaExpr {
    /// `string()`, optionally bounded and format-refined
    String {
        max: Option<u32>,
        format: Option<StringFormat>,
    },
    /// `number()`, `number().int()` when `int`
    Number { int: bool },
    /// `boolean()`
    Boolean,
    /// `unknown()` — opaque value, the fail-open degradation target
    Unknown,
    /// `binary()` — fixed-length binary payload
    Binary,
    /// `array(<element>)`
    Array(Box<SchemaExpr>),
    /// `record(<value>)` — keyed mapping with free-form keys
    Record(Box<SchemaExpr>),
    /// `object({ ... })`, optionally tagged closed/open
    Object {
        fields: Vec<(String, SchemaExpr)>,
        mode: Option<ObjectMode>,
    },
    /// Caller-supplied override text, emitted verbatim
    Verbatim(String),
    /// `.nullable()` decorator
    Nullable(Box<SchemaExpr>),
    /// `.default(<literal>)` decorator
    WithDefault(Box<SchemaExpr>, DefaultLiteral),
}

impl SchemaExpr {
    /// Unbounded, unrefined string validator
    pub fn string() -> Self {
        SchemaExpr::String {
            max: None,
            format: None,
        }
    }

    /// String validator with a format refiner
    pub fn formatted_string(format: StringFormat) -> Self {
        SchemaExpr::String {
            max: None,
            format: Some(format),
        }
    }

    /// Integer validator
    pub fn integer() -> Self {
        SchemaExpr::Number { int: true }
    }

    /// Approximate/exact real number validator
    pub fn number() -> Self {
        SchemaExpr::Number { int: false }
    }

    /// Wrap in the nullable decorator
    pub fn nullable(self) -> Self {
        SchemaExpr::Nullable(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            SchemaExpr::string(),
            SchemaExpr::String {
                max: None,
                format: None
            }
        );
        assert_eq!(SchemaExpr::integer(), SchemaExpr::Number { int: true });
        assert_eq!(
            SchemaExpr::string().nullable(),
            SchemaExpr::Nullable(Box::new(SchemaExpr::string()))
        );
    }
}
