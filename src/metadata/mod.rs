//! Column metadata model and provider seam
//!
//! The mapper never talks to a database. A [`MetadataProvider`] hands it a
//! snapshot of column descriptors for a table, in catalog order, and the
//! rest of the crate treats that snapshot as an immutable value.
//!
//! # Principles
//!
//! 1. Column order is owned by the provider, never reordered here
//! 2. Missing nullability fails closed (not nullable)
//! 3. Fetch failures propagate; no retry, no caching

mod provider;
mod types;

pub use provider::{MemoryProvider, MetadataError, MetadataProvider};
pub use types::{Column, SourceEngine};
