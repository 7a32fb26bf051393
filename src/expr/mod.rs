//! Schema expression model
//!
//! A [`SchemaExpr`] is the tagged result of classifying a column: the full
//! mapping policy lives in one visible enum instead of scattered string
//! comparisons. Rendering produces the target runtime's surface syntax;
//! parsing accepts exactly that vocabulary back (used only for
//! caller-supplied override strings on the live path).

mod ast;
mod parse;
mod render;

pub use ast::{DefaultLiteral, ObjectMode, SchemaExpr, StringFormat};
pub use parse::{parse, ParseError};
