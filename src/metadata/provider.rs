//! Metadata provider trait and in-memory implementation
//!
//! Real deployments implement [`MetadataProvider`] over a catalog query;
//! [`MemoryProvider`] serves tests and embedders that already hold a
//! catalog snapshot.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

use super::types::{Column, SourceEngine};

/// Metadata fetch failure, produced by a provider and propagated untouched.
#[derive(Debug, Clone, Error)]
#[error("Metadata fetch failed: {0}")]
pub struct MetadataError(pub String);

impl MetadataError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Source of column descriptors for a table.
///
/// `fetch_columns` returns descriptors in catalog order; the assembler
/// preserves that order in its output. An empty Vec means the table is
/// unknown or has no columns.
pub trait MetadataProvider {
    /// The engine whose type vocabulary the descriptors use
    fn engine(&self) -> SourceEngine;

    /// Fetch column descriptors for `table`, in catalog order
    fn fetch_columns(&self, table: &str) -> Result<Vec<Column>, MetadataError>;
}

/// In-memory provider over a fixed table registry.
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    engine: SourceEngine,
    tables: HashMap<String, Vec<Column>>,
}

impl MemoryProvider {
    /// Create an empty postgres-flavored provider
    pub fn new() -> Self {
        Self::with_engine(SourceEngine::Postgres)
    }

    /// Create an empty provider reporting the given engine
    pub fn with_engine(engine: SourceEngine) -> Self {
        Self {
            engine,
            tables: HashMap::new(),
        }
    }

    /// Register a table's columns, replacing any previous registration
    pub fn add_table(&mut self, name: impl Into<String>, columns: Vec<Column>) -> &mut Self {
        self.tables.insert(name.into(), columns);
        self
    }

    /// Build a provider from a descriptor document.
    ///
    /// The document maps table name to an array of column descriptors;
    /// array order is catalog order.
    pub fn from_json(doc: serde_json::Value) -> Result<Self, MetadataError> {
        let tables = HashMap::<String, Vec<Column>>::deserialize(doc)
            .map_err(|e| MetadataError::new(format!("invalid descriptor document: {}", e)))?;
        Ok(Self {
            engine: SourceEngine::Postgres,
            tables,
        })
    }

    /// Number of registered tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataProvider for MemoryProvider {
    fn engine(&self) -> SourceEngine {
        self.engine
    }

    fn fetch_columns(&self, table: &str) -> Result<Vec<Column>, MetadataError> {
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registered_table_roundtrip() {
        let mut provider = MemoryProvider::new();
        provider.add_table(
            "users",
            vec![
                Column::new("id", "integer"),
                Column::new("name", "varchar").with_max_length(255),
            ],
        );

        let columns = provider.fetch_columns("users").unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[1].name, "name");
    }

    #[test]
    fn test_unknown_table_is_empty() {
        let provider = MemoryProvider::new();
        assert!(provider.fetch_columns("missing").unwrap().is_empty());
    }

    #[test]
    fn test_from_json_preserves_order() {
        let provider = MemoryProvider::from_json(json!({
            "events": [
                {"name": "z_last", "base_type": "text"},
                {"name": "a_first", "base_type": "integer"}
            ]
        }))
        .unwrap();

        let columns = provider.fetch_columns("events").unwrap();
        assert_eq!(columns[0].name, "z_last");
        assert_eq!(columns[1].name, "a_first");
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let result = MemoryProvider::from_json(json!({"events": {"not": "an array"}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_engine_is_reported() {
        let provider = MemoryProvider::with_engine(SourceEngine::Mysql);
        assert_eq!(provider.engine(), SourceEngine::Mysql);
    }
}
