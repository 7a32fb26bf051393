//! Schema assembly
//!
//! Orchestrates one generation pass: check the provider's engine, fetch
//! column descriptors, filter by allow/deny lists, map each remaining
//! column, and wrap the result in a closed or open object. Output column
//! order is always catalog order; the allow-list selects but never
//! reorders, and the deny-list wins on conflict.

use std::collections::HashMap;

use crate::errors::{SchemaGenError, SchemaGenResult};
use crate::expr::{ObjectMode, SchemaExpr};
use crate::mapper::{map_column, OverrideContext};
use crate::metadata::{MetadataProvider, SourceEngine};
use crate::observability::Logger;

/// Per-invocation mapping options.
///
/// `strict` defaults to `true` (closed object). Both override maps are
/// keyed by column name and only consulted for structured-document
/// columns.
#[derive(Debug, Clone)]
pub struct MappingOptions {
    /// Allow-list of column names; catalog order still wins
    pub columns: Option<Vec<String>>,
    /// Deny-list, applied after the allow-list
    pub exclude: Vec<String>,
    /// Closed (`.strict()`) vs open (`.passthrough()`) object mode
    pub strict: bool,
    /// Verbatim expression text per column, highest precedence
    pub structured_overrides: HashMap<String, String>,
    /// Pattern-library entry name per column
    pub structured_patterns: HashMap<String, String>,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            columns: None,
            exclude: Vec::new(),
            strict: true,
            structured_overrides: HashMap::new(),
            structured_patterns: HashMap::new(),
        }
    }
}

impl MappingOptions {
    /// Default options: every column, closed object, no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the named columns
    pub fn only(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Drop the named columns
    pub fn without(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Open-object mode: undeclared fields pass through
    pub fn open(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Use `text` verbatim for `column`'s structured payload
    pub fn override_column(
        mut self,
        column: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.structured_overrides.insert(column.into(), text.into());
        self
    }

    /// Resolve `column`'s structured payload via the named pattern
    pub fn pattern(mut self, column: impl Into<String>, name: impl Into<String>) -> Self {
        self.structured_patterns.insert(column.into(), name.into());
        self
    }
}

/// Assemble the composite object expression for `table`.
///
/// Fails before any column processing if the provider is not a postgres
/// source; fails with `NotFound` if the table is absent or has no columns.
/// An allow/deny combination that filters every column away yields an
/// empty object, not an error.
pub fn assemble<P: MetadataProvider + ?Sized>(
    provider: &P,
    table: &str,
    options: &MappingOptions,
) -> SchemaGenResult<SchemaExpr> {
    let engine = provider.engine();
    if engine != SourceEngine::Postgres {
        return Err(SchemaGenError::UnsupportedSource(engine.as_str().to_string()));
    }

    let columns = provider.fetch_columns(table)?;
    if columns.is_empty() {
        return Err(SchemaGenError::NotFound(table.to_string()));
    }

    let mut fields = Vec::new();
    for column in &columns {
        if let Some(allow) = &options.columns {
            if !allow.contains(&column.name) {
                continue;
            }
        }
        if options.exclude.contains(&column.name) {
            continue;
        }

        let ctx = OverrideContext {
            literal: options
                .structured_overrides
                .get(&column.name)
                .map(String::as_str),
            pattern: options
                .structured_patterns
                .get(&column.name)
                .map(String::as_str),
        };
        fields.push((column.name.clone(), map_column(column, &ctx)?));
    }

    let mode = if options.strict {
        ObjectMode::Strict
    } else {
        ObjectMode::Passthrough
    };

    let included = fields.len().to_string();
    Logger::info(
        "SCHEMA_GENERATED",
        &[("columns", included.as_str()), ("table", table)],
    );

    Ok(SchemaExpr::Object {
        fields,
        mode: Some(mode),
    })
}

/// Render the assembled expression as text.
///
/// Byte-identical across calls for identical inputs.
pub fn generate_schema_text<P: MetadataProvider + ?Sized>(
    provider: &P,
    table: &str,
    options: &MappingOptions,
) -> SchemaGenResult<String> {
    Ok(assemble(provider, table, options)?.to_string())
}
