//! Column descriptor types
//!
//! A [`Column`] is the unit the type mapper consumes: base type token as it
//! appears in the catalog (possibly with precision/scale suffixes or an
//! array marker), nullability, optional length bound, and the raw default
//! literal if the catalog records one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source engine reported by a metadata provider.
///
/// The type mapper targets exactly one source vocabulary; anything other
/// than [`SourceEngine::Postgres`] is rejected before column processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEngine {
    Postgres,
    Mysql,
    Sqlite,
    Mssql,
}

impl SourceEngine {
    /// Returns the lowercase engine name
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceEngine::Postgres => "postgres",
            SourceEngine::Mysql => "mysql",
            SourceEngine::Sqlite => "sqlite",
            SourceEngine::Mssql => "mssql",
        }
    }
}

impl fmt::Display for SourceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One column's catalog metadata.
///
/// `nullable` defaults to `false` when absent so an incomplete descriptor
/// fails closed. `default_value` holds the literal exactly as the catalog
/// reports it; interpretation happens in the default normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Catalog type token, e.g. `character varying(255)` or `_int4`
    pub base_type: String,
    /// Whether the column admits NULL
    #[serde(default)]
    pub nullable: bool,
    /// Explicit length bound for bounded string types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Raw catalog default literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Column {
    /// Create a non-nullable column with no bound and no default
    pub fn new(name: impl Into<String>, base_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: base_type.into(),
            nullable: false,
            max_length: None,
            default_value: None,
        }
    }

    /// Mark the column nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Attach an explicit length bound
    pub fn with_max_length(mut self, limit: u32) -> Self {
        self.max_length = Some(limit);
        self
    }

    /// Attach a raw catalog default literal
    pub fn with_default(mut self, literal: impl Into<String>) -> Self {
        self.default_value = Some(literal.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builders() {
        let col = Column::new("email", "varchar")
            .nullable()
            .with_max_length(255);
        assert_eq!(col.name, "email");
        assert_eq!(col.base_type, "varchar");
        assert!(col.nullable);
        assert_eq!(col.max_length, Some(255));
        assert!(col.default_value.is_none());
    }

    #[test]
    fn test_nullability_fails_closed_on_deserialize() {
        let col: Column =
            serde_json::from_str(r#"{"name":"id","base_type":"integer"}"#).unwrap();
        assert!(!col.nullable);
        assert!(col.max_length.is_none());
        assert!(col.default_value.is_none());
    }

    #[test]
    fn test_explicit_null_default_means_no_default() {
        let col: Column = serde_json::from_str(
            r#"{"name":"id","base_type":"integer","default_value":null}"#,
        )
        .unwrap();
        assert!(col.default_value.is_none());
    }

    #[test]
    fn test_engine_names() {
        assert_eq!(SourceEngine::Postgres.as_str(), "postgres");
        assert_eq!(SourceEngine::Mysql.as_str(), "mysql");
        assert_eq!(format!("{}", SourceEngine::Sqlite), "sqlite");
    }
}
