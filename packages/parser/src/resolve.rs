//! Turns raw grammar captures into normalized field values.
//!
//! Nothing here can fail: validation of the resulting parts is the
//! assembler's job.

use street_sweeper_models::{AddressParts, IntersectionParts, ParseOptions};

use crate::ambiguity;
use crate::engine::{RawAddress, RawIntersection};
use crate::grammar::{self, StreetSpan};
use crate::tables;
use crate::token::Token;

/// Normalized street fields shared by both record kinds.
#[derive(Debug, Default)]
struct Street {
    prefix: Option<String>,
    name: String,
    street_type: Option<String>,
    suffix: Option<String>,
}

#[must_use]
pub fn address(raw: &RawAddress<'_>, options: &ParseOptions) -> AddressParts {
    let (postal_code, postal_code_ext) = postal(raw.postal);
    let city = city(raw.city);
    let state = raw.state.map(str::to_string);

    if let Some(po_box) = raw.po_box {
        return AddressParts {
            street: format!("PO Box {}", po_box.key),
            city,
            state,
            postal_code,
            postal_code_ext,
            ..AddressParts::default()
        };
    }

    let street = raw
        .street
        .as_ref()
        .map(|span| street(span, None, options))
        .unwrap_or_default();
    let unit = raw.unit.as_ref();

    AddressParts {
        number: raw.number.map(|t| t.key.clone()),
        prefix: street.prefix,
        street: street.name,
        street_type: street.street_type,
        suffix: street.suffix,
        unit_prefix: unit.and_then(|u| u.prefix).map(str::to_string),
        unit: unit.and_then(|u| u.id.clone()),
        implicit_unit: unit.is_some_and(|u| u.implicit),
        city,
        state,
        postal_code,
        postal_code_ext,
    }
}

#[must_use]
pub fn intersection(raw: &RawIntersection<'_>, options: &ParseOptions) -> IntersectionParts {
    let (postal_code, postal_code_ext) = postal(raw.postal);
    let first = street(&raw.first, raw.shared_type, options);
    let second = street(&raw.second, None, options);

    IntersectionParts {
        street: first.name,
        street_type: first.street_type,
        prefix: first.prefix,
        suffix: first.suffix,
        street2: second.name,
        street_type2: second.street_type,
        prefix2: second.prefix,
        suffix2: second.suffix,
        city: city(raw.city),
        state: raw.state.map(str::to_string),
        postal_code,
        postal_code_ext,
    }
}

fn street(span: &StreetSpan<'_>, shared_type: Option<&'static str>, options: &ParseOptions) -> Street {
    let name = span
        .name
        .iter()
        .map(|token| {
            tables::ordinal(&token.key)
                .map_or_else(|| title_case(&token.bare_text()), str::to_string)
        })
        .collect::<Vec<_>>()
        .join(" ");

    let street_type = span
        .street_type
        .and_then(|t| tables::street_type(&t.key))
        .map(|m| m.canonical)
        .or(shared_type)
        .filter(|canonical| !(options.avoid_redundant_street_type && embeds_type(span, canonical)));

    Street {
        prefix: span.prefix.and_then(|t| tables::directional(&t.key)).map(str::to_string),
        name,
        street_type: street_type.map(str::to_string),
        suffix: span.suffix.and_then(|t| tables::directional(&t.key)).map(str::to_string),
    }
}

/// The street name already carries a word of the given type (`County
/// Road 43` and `Rd`).
fn embeds_type(span: &StreetSpan<'_>, canonical: &str) -> bool {
    let embedded = span
        .name
        .iter()
        .any(|t| tables::street_type(&t.key).is_some_and(|m| m.canonical == canonical));
    if embedded {
        log::debug!("suppressing redundant street type {canonical}");
    }
    embedded
}

fn city(tokens: &[Token]) -> Option<String> {
    if tokens.is_empty() {
        return None;
    }
    let (lead, rest) = match ambiguity::city_leading_directional(tokens) {
        Some(directional) => (tables::directional_long_form(directional), &tokens[1..]),
        None => (None, tokens),
    };
    let words = lead
        .into_iter()
        .chain(rest.iter().map(|t| title_case(&t.text)));
    Some(words.collect::<Vec<_>>().join(" "))
}

fn postal(token: Option<&Token>) -> (Option<String>, Option<String>) {
    token
        .and_then(grammar::split_postal)
        .map_or((None, None), |(code, ext)| (Some(code), ext))
}

/// Title-cases each hyphen-separated part of a word.
fn title_case(text: &str) -> String {
    text.split('-')
        .map(tables::title_case_word)
        .collect::<Vec<_>>()
        .join("-")
}
