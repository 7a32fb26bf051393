//! Reusable structured-payload fragments
//!
//! Document columns (`json`/`jsonb`) carry no catalog shape, so callers
//! name one of these fragments instead of writing expression text by hand.
//! The registry is fixed at compile time; `record-of` and `array-of` take
//! a parameter, the rest are closed compositions.

use crate::errors::{SchemaGenError, SchemaGenResult};
use crate::expr::SchemaExpr;

/// Registry entry: a closed fragment or a parameterized constructor.
#[derive(Clone, Copy)]
pub enum Pattern {
    Fixed(fn() -> SchemaExpr),
    Parameterized(fn(SchemaExpr) -> SchemaExpr),
}

/// Pattern names, sorted, as returned by [`list_patterns`]
pub const PATTERN_NAMES: &[&str] = &[
    "address",
    "array-of",
    "metadata",
    "number-list",
    "profile",
    "record-of",
    "settings",
    "string-list",
    "tags",
];

/// One row of the pattern listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternInfo {
    pub name: &'static str,
    /// Rendered text for closed fragments, `None` for parameterized ones
    pub expression: Option<String>,
    pub takes_parameter: bool,
}

fn lookup(name: &str) -> Option<Pattern> {
    let pattern = match name {
        "record-of" => Pattern::Parameterized(|value| SchemaExpr::Record(Box::new(value))),
        "array-of" => Pattern::Parameterized(|element| SchemaExpr::Array(Box::new(element))),
        "string-list" => Pattern::Fixed(string_list),
        "number-list" => Pattern::Fixed(number_list),
        "tags" => Pattern::Fixed(string_list),
        "metadata" => Pattern::Fixed(free_form_metadata),
        "profile" => Pattern::Fixed(profile),
        "settings" => Pattern::Fixed(settings),
        "address" => Pattern::Fixed(postal_address),
        _ => return None,
    };
    Some(pattern)
}

/// Resolve a pattern by name.
///
/// A parameterized pattern resolved without a parameter uses `unknown()`;
/// an unknown name is a configuration error.
pub fn resolve(name: &str, parameter: Option<SchemaExpr>) -> SchemaGenResult<SchemaExpr> {
    match lookup(name) {
        Some(Pattern::Fixed(build)) => Ok(build()),
        Some(Pattern::Parameterized(build)) => {
            Ok(build(parameter.unwrap_or(SchemaExpr::Unknown)))
        }
        None => Err(SchemaGenError::Configuration(format!(
            "unknown pattern '{}'",
            name
        ))),
    }
}

/// List every registry entry, sorted by name.
pub fn list_patterns() -> Vec<PatternInfo> {
    PATTERN_NAMES
        .iter()
        .map(|&name| match lookup(name) {
            Some(Pattern::Fixed(build)) => PatternInfo {
                name,
                expression: Some(build().to_string()),
                takes_parameter: false,
            },
            _ => PatternInfo {
                name,
                expression: None,
                takes_parameter: true,
            },
        })
        .collect()
}

fn string_list() -> SchemaExpr {
    SchemaExpr::Array(Box::new(SchemaExpr::string()))
}

fn number_list() -> SchemaExpr {
    SchemaExpr::Array(Box::new(SchemaExpr::number()))
}

fn free_form_metadata() -> SchemaExpr {
    SchemaExpr::Record(Box::new(SchemaExpr::Unknown))
}

fn profile() -> SchemaExpr {
    SchemaExpr::Object {
        fields: vec![
            ("display_name".into(), SchemaExpr::string().nullable()),
            ("avatar_url".into(), SchemaExpr::string().nullable()),
            ("bio".into(), SchemaExpr::string().nullable()),
            ("locale".into(), SchemaExpr::string().nullable()),
        ],
        mode: None,
    }
}

fn settings() -> SchemaExpr {
    SchemaExpr::Object {
        fields: vec![
            ("theme".into(), SchemaExpr::string().nullable()),
            ("language".into(), SchemaExpr::string().nullable()),
            ("notifications".into(), SchemaExpr::Boolean.nullable()),
        ],
        mode: None,
    }
}

fn postal_address() -> SchemaExpr {
    SchemaExpr::Object {
        fields: vec![
            ("line1".into(), SchemaExpr::string()),
            ("line2".into(), SchemaExpr::string().nullable()),
            ("city".into(), SchemaExpr::string()),
            ("region".into(), SchemaExpr::string().nullable()),
            ("postal_code".into(), SchemaExpr::string()),
            ("country".into(), SchemaExpr::string()),
        ],
        mode: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_fragments_render() {
        assert_eq!(resolve("tags", None).unwrap().to_string(), "array(string())");
        assert_eq!(
            resolve("number-list", None).unwrap().to_string(),
            "array(number())"
        );
        assert_eq!(
            resolve("metadata", None).unwrap().to_string(),
            "record(unknown())"
        );
    }

    #[test]
    fn test_parameterized_fragments() {
        let expr = resolve("record-of", Some(SchemaExpr::number())).unwrap();
        assert_eq!(expr.to_string(), "record(number())");

        let expr = resolve("array-of", Some(SchemaExpr::Boolean)).unwrap();
        assert_eq!(expr.to_string(), "array(boolean())");

        // Bare reference falls back to an unknown parameter
        let expr = resolve("record-of", None).unwrap();
        assert_eq!(expr.to_string(), "record(unknown())");
    }

    #[test]
    fn test_unknown_name_is_configuration_error() {
        let err = resolve("nope", None).unwrap_err();
        assert_eq!(err.code(), "VET_CONFIGURATION");
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_listing_covers_registry_in_order() {
        let listing = list_patterns();
        let names: Vec<&str> = listing.iter().map(|p| p.name).collect();
        assert_eq!(names, PATTERN_NAMES);

        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_listing_marks_parameterized_entries() {
        for info in list_patterns() {
            match info.name {
                "record-of" | "array-of" => {
                    assert!(info.takes_parameter);
                    assert!(info.expression.is_none());
                }
                _ => {
                    assert!(!info.takes_parameter);
                    assert!(info.expression.is_some());
                }
            }
        }
    }

    #[test]
    fn test_profile_fragment_shape() {
        let text = resolve("profile", None).unwrap().to_string();
        assert!(text.starts_with("object({ "));
        assert!(text.contains("display_name: string().nullable()"));
        assert!(text.contains("avatar_url"));
    }

    #[test]
    fn test_address_fragment_shape() {
        let text = resolve("address", None).unwrap().to_string();
        assert!(text.contains("line1: string()"));
        assert!(text.contains("line2: string().nullable()"));
        assert!(text.contains("country: string()"));
    }
}
