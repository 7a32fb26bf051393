//! Crate-wide error taxonomy
//!
//! Error codes:
//! - VET_TABLE_NOT_FOUND (table absent or has zero columns)
//! - VET_UNSUPPORTED_SOURCE (metadata provider is not a postgres source)
//! - VET_CONFIGURATION (unknown pattern name)
//! - VET_EVALUATION (override text rejected on the live path)
//! - VET_METADATA (provider fetch failure, propagated as-is)
//!
//! An unrecognized column type is NOT an error: it degrades to `unknown()`
//! so one odd column cannot abort a wide table scan.

use thiserror::Error;

use crate::metadata::MetadataError;

/// Result type for schema generation operations
pub type SchemaGenResult<T> = Result<T, SchemaGenError>;

/// Schema generation errors
#[derive(Debug, Error)]
pub enum SchemaGenError {
    /// Table absent or empty after metadata fetch
    #[error("Table '{0}' not found or has no columns")]
    NotFound(String),

    /// Metadata provider reports an engine the mapper does not target
    #[error("Unsupported source engine '{0}': only postgres metadata is supported")]
    UnsupportedSource(String),

    /// Invalid caller configuration, e.g. a reference to a nonexistent pattern
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Override text failed to parse against the expression vocabulary
    #[error("Schema evaluation failed for table '{table}': {reason}")]
    Evaluation { table: String, reason: String },

    /// Metadata fetch failure, surfaced without retry
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl SchemaGenError {
    /// Returns the stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            SchemaGenError::NotFound(_) => "VET_TABLE_NOT_FOUND",
            SchemaGenError::UnsupportedSource(_) => "VET_UNSUPPORTED_SOURCE",
            SchemaGenError::Configuration(_) => "VET_CONFIGURATION",
            SchemaGenError::Evaluation { .. } => "VET_EVALUATION",
            SchemaGenError::Metadata(_) => "VET_METADATA",
        }
    }
}
