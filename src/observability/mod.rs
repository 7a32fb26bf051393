//! Observability
//!
//! Structured JSON logging for schema generation events
//! (`SCHEMA_GENERATED`, `SCHEMA_BUILT`).
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on generation
//! 3. No async or background threads
//! 4. Deterministic output

mod logger;

pub use logger::{Logger, Severity};
