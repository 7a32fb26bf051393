//! Type-token classification
//!
//! One total lookup from the open postgres type vocabulary into
//! [`TypeClass`]. The fallback policy is a single visible final arm:
//! identifier-shaped unknown tokens are treated as enumerated custom types
//! (string-representable), anything else degrades to `Unknown`. Never an
//! error — one unrecognized column must not abort a wide table scan.

use regex::Regex;
use std::sync::OnceLock;

/// The two structured-document column kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Json,
    JsonBinary,
}

/// Closed classification target for column base types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClass {
    /// Length-boundable string (`varchar`, `char`, ...)
    BoundedString,
    /// Unbounded string (`text`, `citext`, `name`)
    UnboundedString,
    /// Whole-number types, serials included
    Integer,
    /// Exact and approximate reals
    Real,
    Boolean,
    /// Calendar date
    Date,
    /// Timestamp with or without zone
    Timestamp,
    /// Time of day
    Time,
    /// Structured payload column (`json`, `jsonb`)
    Document(DocumentKind),
    /// UUID-shaped identifier token
    Identifier,
    /// Binary payload (`bytea`)
    Binary,
    /// Homogeneous array of the boxed element class
    ArrayOf(Box<TypeClass>),
    /// Identifier-shaped token not in the table: assumed custom enum
    Enumerated,
    /// Everything else
    Unknown,
}

static PRECISION: OnceLock<Regex> = OnceLock::new();
static IDENT_SHAPE: OnceLock<Regex> = OnceLock::new();
static SPACES: OnceLock<Regex> = OnceLock::new();

fn precision_re() -> &'static Regex {
    PRECISION.get_or_init(|| {
        Regex::new(r"\(\s*\d+\s*(?:,\s*\d+\s*)?\)").expect("hard-coded pattern")
    })
}

fn ident_shape_re() -> &'static Regex {
    IDENT_SHAPE
        .get_or_init(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("hard-coded pattern"))
}

fn spaces_re() -> &'static Regex {
    SPACES.get_or_init(|| Regex::new(r"\s+").expect("hard-coded pattern"))
}

/// Classify a raw catalog type token.
///
/// Handles precision/scale suffixes (`varchar(255)`, `numeric(10,2)`,
/// `timestamp(3) with time zone`) and both array spellings (`text[]`,
/// `_int4`), recursing on the element type with the full table.
pub fn classify(token: &str) -> TypeClass {
    let lowered = token.trim().to_lowercase();

    // Array markers first, so `varchar(255)[]` strips its suffix in the
    // recursive call
    if let Some(element) = lowered.strip_suffix("[]") {
        return TypeClass::ArrayOf(Box::new(classify(element)));
    }
    if let Some(element) = lowered.strip_prefix('_') {
        if !element.is_empty() {
            return TypeClass::ArrayOf(Box::new(classify(element)));
        }
    }

    let stripped = precision_re().replace_all(&lowered, "");
    let normalized = spaces_re().replace_all(stripped.trim(), " ").into_owned();

    match normalized.as_str() {
        "varchar" | "character varying" | "char" | "character" | "bpchar" => {
            TypeClass::BoundedString
        }

        "text" | "citext" | "name" => TypeClass::UnboundedString,

        "smallint" | "int2" | "integer" | "int" | "int4" | "bigint" | "int8" | "smallserial"
        | "serial2" | "serial" | "serial4" | "bigserial" | "serial8" => TypeClass::Integer,

        "numeric" | "decimal" | "real" | "float4" | "double precision" | "float8" => {
            TypeClass::Real
        }

        "boolean" | "bool" => TypeClass::Boolean,

        "date" => TypeClass::Date,
        "timestamp" | "timestamptz" | "timestamp with time zone"
        | "timestamp without time zone" => TypeClass::Timestamp,
        "time" | "timetz" | "time with time zone" | "time without time zone" => TypeClass::Time,

        "json" => TypeClass::Document(DocumentKind::Json),
        "jsonb" => TypeClass::Document(DocumentKind::JsonBinary),

        "uuid" => TypeClass::Identifier,

        "bytea" => TypeClass::Binary,

        // Free-text categories: geometric, network, bit string, currency,
        // range, plus the text-search and markup types
        "point" | "line" | "lseg" | "box" | "path" | "polygon" | "circle" | "inet" | "cidr"
        | "macaddr" | "macaddr8" | "bit" | "bit varying" | "varbit" | "money" | "int4range"
        | "int8range" | "numrange" | "tsrange" | "tstzrange" | "daterange" | "xml"
        | "tsvector" | "tsquery" | "interval" => TypeClass::UnboundedString,

        // Final arm: the whole fallback policy in one place
        other => {
            if ident_shape_re().is_match(other) {
                TypeClass::Enumerated
            } else {
                TypeClass::Unknown
            }
        }
    }
}
