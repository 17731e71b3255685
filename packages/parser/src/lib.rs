#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Parser and normalizer for free-form North American postal addresses.
//!
//! An input string runs through a fixed pipeline:
//!
//! 1. [`preprocess`] cleans whitespace and punctuation noise and pulls out
//!    a glued leading unit (`lt42 99 Some Road`).
//! 2. [`token`] splits the text into case-preserving tokens with
//!    normalized lookup keys.
//! 3. [`engine`] tries the [`engine::Grammar`]s in precedence order. The
//!    grammars are built from the sub-patterns in [`grammar`] and settle
//!    ambiguous readings through the decision functions in [`ambiguity`].
//! 4. [`resolve`] applies the normalization [`tables`] and renders names.
//! 5. [`assemble`] builds an immutable record, or rejects the match when
//!    the record would break an invariant.
//!
//! All tables and regexes are compiled once on first use and shared
//! read-only, so any number of threads may parse concurrently.
//!
//! ```
//! let record = street_sweeper::parse_address("1005 N Gravenstein Hwy, Sebastopol, CA 95472").unwrap();
//! assert_eq!(record.prefix(), Some("N"));
//! assert_eq!(record.street(), "Gravenstein");
//! assert_eq!(record.street_type(), Some("Hwy"));
//! assert_eq!(record.city(), Some("Sebastopol"));
//! ```

pub mod ambiguity;
pub mod assemble;
pub mod engine;
pub mod grammar;
pub mod options;
pub mod preprocess;
pub mod resolve;
pub mod tables;
pub mod token;

pub use options::OptionsError;
pub use street_sweeper_models::{
    AddressRecord, IntersectionRecord, ParseOptions, ParsedLocation, RecordError,
};
pub use tables::{TableKind, normalize};

use engine::Grammar;
use preprocess::preprocess;
use token::tokenize;

/// Parses an address or an intersection.
///
/// Returns `None` when no enabled grammar matches the whole input. That
/// is an expected outcome for incomplete or malformed input.
#[must_use]
pub fn parse(input: &str, options: &ParseOptions) -> Option<ParsedLocation> {
    run(input, options, |tokens| engine::attempts(tokens, options))
}

/// Parses a standard address with default options.
///
/// Street-only text, a city with no state, an unknown state code and a
/// house number with a stray letter prefix all yield `None`.
#[must_use]
pub fn parse_address(input: &str) -> Option<AddressRecord> {
    run(input, &ParseOptions::default(), |_| vec![Grammar::Standard]).and_then(into_address)
}

/// Parses an address with the informal fallback enabled, whatever
/// `options.informal` says.
#[must_use]
pub fn parse_informal_address(input: &str, options: &ParseOptions) -> Option<AddressRecord> {
    let options = ParseOptions {
        informal: true,
        ..*options
    };
    run(input, &options, |_| vec![Grammar::Standard, Grammar::Informal]).and_then(into_address)
}

/// Parses an intersection of two streets.
#[must_use]
pub fn parse_intersection(input: &str, options: &ParseOptions) -> Option<IntersectionRecord> {
    match run(input, options, |_| vec![Grammar::Intersection])? {
        ParsedLocation::Intersection(record) => Some(record),
        ParsedLocation::Address(_) => None,
    }
}

fn into_address(location: ParsedLocation) -> Option<AddressRecord> {
    match location {
        ParsedLocation::Address(record) => Some(record),
        ParsedLocation::Intersection(_) => None,
    }
}

fn run(
    input: &str,
    options: &ParseOptions,
    order: impl FnOnce(&[token::Token]) -> Vec<Grammar>,
) -> Option<ParsedLocation> {
    let cleaned = preprocess(input);
    let tokens = tokenize(&cleaned.text);
    log::trace!(
        "tokens: {:?}",
        tokens.iter().map(|t| t.key.as_str()).collect::<Vec<_>>()
    );

    let parsed = order(&tokens).into_iter().find_map(|grammar| {
        let raw = engine::match_grammar(grammar, &tokens, cleaned.leading_unit.as_ref())?;
        log::trace!("{grammar} captures: {raw:?}");
        let location = assemble::assemble(&raw, options)?;
        log::debug!("{grammar} grammar matched {input:?}");
        Some(location)
    });

    if parsed.is_none() {
        log::debug!("no address found in {input:?}");
    }
    parsed
}
