//! schemavet - derive runtime validation schemas from relational column metadata
//!
//! Given a table's column descriptors (from a [`metadata::MetadataProvider`]),
//! the crate deterministically produces a composite validation schema: as
//! text in the target runtime's surface syntax
//! ([`generate_schema_text`]), or as a live schema value built directly
//! against a [`runtime::SchemaRuntime`] implementation
//! ([`generate_schema_value`]).

pub mod assembler;
pub mod errors;
pub mod expr;
pub mod mapper;
pub mod metadata;
pub mod observability;
pub mod patterns;
pub mod runtime;

pub use assembler::{assemble, generate_schema_text, MappingOptions};
pub use errors::{SchemaGenError, SchemaGenResult};
pub use expr::{DefaultLiteral, ObjectMode, SchemaExpr, StringFormat};
pub use mapper::{classify, map_column, map_column_type, OverrideContext, TypeClass};
pub use metadata::{Column, MemoryProvider, MetadataError, MetadataProvider, SourceEngine};
pub use patterns::{list_patterns, PatternInfo};
pub use runtime::{generate_schema_value, JsonRuntime, SchemaRuntime, ValidationError, Validator};
