//! Schema runtime seam and live builder
//!
//! A [`SchemaRuntime`] exposes the constructor/decorator vocabulary the
//! mapper emits. The live builder folds the assembled expression tree
//! directly into constructor calls; no generated text is ever evaluated
//! as code. [`JsonRuntime`] is the in-crate reference implementation,
//! validating `serde_json::Value` documents.

mod build;
mod json;

pub use build::{build_value, generate_schema_value};
pub use json::{JsonRuntime, ValidationError, Validator};

use crate::expr::DefaultLiteral;

/// Constructor and decorator surface of a target validation runtime.
///
/// Names match the rendered vocabulary one-for-one, so text output and
/// direct construction describe the same schema. All calls are infallible
/// value builders; a runtime that cannot express a constructor surfaces
/// that in its own validation behavior, not in the build.
pub trait SchemaRuntime {
    /// The runtime's schema value
    type Value;

    fn string(&self) -> Self::Value;
    fn number(&self) -> Self::Value;
    fn boolean(&self) -> Self::Value;
    fn unknown(&self) -> Self::Value;
    fn binary(&self) -> Self::Value;
    fn array(&self, element: Self::Value) -> Self::Value;
    fn record(&self, value: Self::Value) -> Self::Value;
    fn object(&self, fields: Vec<(String, Self::Value)>) -> Self::Value;

    /// Restrict a number to integers
    fn int(&self, value: Self::Value) -> Self::Value;
    /// Bound a string's length
    fn max_length(&self, value: Self::Value, limit: u32) -> Self::Value;
    /// Calendar-date format refiner
    fn date(&self, value: Self::Value) -> Self::Value;
    /// Timestamp format refiner
    fn datetime(&self, value: Self::Value) -> Self::Value;
    /// Time-of-day format refiner
    fn time(&self, value: Self::Value) -> Self::Value;
    /// UUID format refiner
    fn uuid(&self, value: Self::Value) -> Self::Value;
    /// Admit null
    fn nullable(&self, value: Self::Value) -> Self::Value;
    /// Attach a default for absent fields
    fn with_default(&self, value: Self::Value, literal: &DefaultLiteral) -> Self::Value;
    /// Closed-object mode: undeclared fields rejected
    fn strict(&self, value: Self::Value) -> Self::Value;
    /// Open-object mode: undeclared fields admitted
    fn passthrough(&self, value: Self::Value) -> Self::Value;
}
