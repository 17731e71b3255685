//! Input cleanup applied before any grammar runs.
//!
//! Case is preserved here; title-casing happens during field resolution.

use regex::Regex;
use std::sync::LazyLock;

use crate::tables;

/// A line break, with any whitespace around it.
static NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[\r\n]+\s*").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Runs of commas left behind once newlines become separators.
static REPEATED_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,(?:\s*,)+").expect("valid regex"));

/// Leading noise: anything that is not a letter, digit or `#`.
static LEADING_NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\p{L}\p{N}#]+").expect("valid regex"));

/// Trailing noise: anything that is not a letter or digit.
static TRAILING_NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+$").expect("valid regex"));

/// A unit designator glued to its number directly before the house
/// number (`lt42 99 Some Road`).
static LEADING_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{1,4})\.?([0-9]+[A-Za-z]?)\s+([0-9])").expect("valid regex")
});

/// A secondary unit found before the house number with no space between
/// its designator and its number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingUnit {
    /// Canonical designator (`Lot`).
    pub designator: &'static str,
    /// Unit identifier.
    pub id: String,
}

/// The cleaned input plus anything the cleanup pulled out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    pub text: String,
    pub leading_unit: Option<LeadingUnit>,
}

/// Cleans raw input:
///
/// 1. Line breaks become comma separators; whitespace runs collapse to a
///    single space.
/// 2. Enclosing parentheses, quotes and other stray punctuation are
///    trimmed from both ends.
/// 3. A glued leading unit (`lt42`) in front of a house number is
///    removed and returned as [`LeadingUnit`].
#[must_use]
pub fn preprocess(input: &str) -> Preprocessed {
    let text = NEWLINE_RE.replace_all(input.trim(), ", ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = REPEATED_COMMA_RE.replace_all(&text, ",");
    let text = LEADING_NOISE_RE.replace(&text, "");
    let text = TRAILING_NOISE_RE.replace(&text, "").into_owned();

    let leading = LEADING_UNIT_RE.captures(&text).and_then(|caps| {
        let designator = tables::unit_designator(&caps[1]).filter(|d| d.numbered)?;
        let rest_start = caps.get(3)?.start();
        Some((
            LeadingUnit {
                designator: designator.canonical,
                id: caps[2].to_uppercase(),
            },
            rest_start,
        ))
    });

    match leading {
        Some((unit, rest_start)) => Preprocessed {
            text: text[rest_start..].to_string(),
            leading_unit: Some(unit),
        },
        None => Preprocessed {
            text,
            leading_unit: None,
        },
    }
}
