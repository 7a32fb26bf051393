//! Catalog default-literal normalization
//!
//! Server-computed defaults (clock reads, sequence draws, generated UUIDs)
//! are values the client never supplies, so they are skipped rather than
//! surfaced as validation defaults. Everything else is surfaced: quoted
//! strings unwrapped, numerics kept in their source spelling, booleans
//! recognized, and any remaining literal stringified whole.

use regex::Regex;
use std::sync::OnceLock;

use crate::expr::DefaultLiteral;

/// Outcome of inspecting one raw default literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Database-computed; emit no default decorator
    Skip,
    /// Client-expressible literal
    Literal(DefaultLiteral),
}

static CAST_SUFFIX: OnceLock<Regex> = OnceLock::new();
static CALLEE: OnceLock<Regex> = OnceLock::new();

fn cast_suffix_re() -> &'static Regex {
    // `::type name`, optionally quoted, optionally array-suffixed
    CAST_SUFFIX.get_or_init(|| {
        Regex::new(r#"\s*::\s*"?[a-zA-Z_][a-zA-Z0-9_ .]*"?\s*(?:\[\s*\])?\s*$"#)
            .expect("hard-coded pattern")
    })
}

fn callee_re() -> &'static Regex {
    CALLEE.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\s*(\(.*\))?$")
            .expect("hard-coded pattern")
    })
}

/// Clock-read callees, plus the bare SQL keyword forms catalogs emit
const CLOCK_CALLEES: &[&str] = &[
    "now",
    "current_timestamp",
    "current_date",
    "current_time",
    "localtimestamp",
    "localtime",
    "clock_timestamp",
    "statement_timestamp",
    "transaction_timestamp",
];

/// Keyword forms that appear without a call-parenthesis tail
const CLOCK_KEYWORDS: &[&str] = &[
    "current_timestamp",
    "current_date",
    "current_time",
    "localtimestamp",
    "localtime",
];

/// Sequence/identity generators; server-assigned, never client defaults
const SEQUENCE_CALLEES: &[&str] = &["nextval", "uuid_generate_v4", "gen_random_uuid"];

/// Normalize a raw catalog default literal. First matching rule wins.
pub fn normalize_default(raw: &str) -> Normalized {
    let mut text = raw.trim().to_string();

    // 1. Strip trailing cast annotations, e.g. `'{}'::jsonb`,
    //    `'x'::character varying[]`
    while cast_suffix_re().is_match(&text) {
        text = cast_suffix_re().replace(&text, "").trim().to_string();
    }

    // 2 & 3. Clock reads and sequence draws
    if let Some(caps) = callee_re().captures(&text) {
        let callee_path = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let callee = callee_path
            .rsplit('.')
            .next()
            .unwrap_or(callee_path)
            .to_lowercase();
        let has_call = caps.get(2).is_some();

        if has_call && CLOCK_CALLEES.contains(&callee.as_str()) {
            return Normalized::Skip;
        }
        if !has_call && CLOCK_KEYWORDS.contains(&callee.as_str()) {
            return Normalized::Skip;
        }
        if has_call && SEQUENCE_CALLEES.contains(&callee.as_str()) {
            return Normalized::Skip;
        }
    }

    // 4. Single-quoted string literal, `''` unescaped
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        let inner = text[1..text.len() - 1].replace("''", "'");
        return Normalized::Literal(DefaultLiteral::Str(inner));
    }

    // 5. Numeric literal, source spelling preserved
    if !text.is_empty() && text.parse::<f64>().is_ok() {
        return Normalized::Literal(DefaultLiteral::Num(text));
    }

    // 6. Boolean literal
    if text == "true" {
        return Normalized::Literal(DefaultLiteral::Bool(true));
    }
    if text == "false" {
        return Normalized::Literal(DefaultLiteral::Bool(false));
    }

    // 7. Last-resort stringification of the cast-stripped text
    Normalized::Literal(DefaultLiteral::Str(text))
}
