//! Free-form name normalization.
//!
//! Turns handwritten names such as `"  big-bang_burger!! "` into a
//! canonical display form (`"Big Bang Burger"`).

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::NormalizeError;

static SEPARATORS: OnceLock<Regex> = OnceLock::new();
static DISALLOWED: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RUNS: OnceLock<Regex> = OnceLock::new();

fn static_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static name pattern must compile"))
}

/// Normalizes an arbitrary JSON value.
///
/// Anything other than a string is rejected.
pub fn normalize_value(input: &Value) -> Result<String, NormalizeError> {
    match input {
        Value::String(s) => normalize(s),
        _ => Err(NormalizeError::InvalidInput {
            reason: "name must be a string",
        }),
    }
}

/// Normalizes a handwritten name.
///
/// Hyphens and underscores become spaces, everything except ASCII letters
/// and whitespace is dropped, whitespace runs collapse to a single space,
/// and the first letter of every word is uppercased. The remaining letters
/// keep their case.
///
/// ```
/// assert_eq!(cookbook::normalize("  big-bang_burger!! ").unwrap(), "Big Bang Burger");
/// assert!(cookbook::normalize("###").is_err());
/// ```
pub fn normalize(input: &str) -> Result<String, NormalizeError> {
    let spaced = static_regex(&SEPARATORS, r"[-_]").replace_all(input, " ");
    let letters = static_regex(&DISALLOWED, r"[^A-Za-z\s]").replace_all(&spaced, "");
    let collapsed = static_regex(&WHITESPACE_RUNS, r"\s+").replace_all(&letters, " ");
    let trimmed = collapsed.trim();

    if trimmed.is_empty() {
        return Err(NormalizeError::InvalidInput {
            reason: "no letters left after normalization",
        });
    }

    let words: Vec<String> = trimmed.split(' ').map(capitalize_first).collect();
    Ok(words.join(" "))
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
