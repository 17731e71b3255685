//! Sub-patterns the three grammars are assembled from.
//!
//! Each recognizer works on a token slice and reports how many tokens it
//! consumed. None of them allocate beyond the owned unit identifiers.

use regex::Regex;
use std::sync::LazyLock;

use crate::ambiguity::{self, LeadingDirectional};
use crate::preprocess::LeadingUnit;
use crate::tables;
use crate::token::Token;

/// Five digits, optionally followed by four more (hyphenated or not).
static POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{5})(?:-?([0-9]{4}))?$").expect("valid regex"));

/// `1/2`, `3/4`, ...
static FRACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+/[0-9]+$").expect("valid regex"));

/// Secondary unit identifiers: `207`, `D304`, `12B`, `A`, `3-2`.
static UNIT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z]{0,2}[0-9]+[A-Z]?|[A-Z]|[0-9]+-[0-9A-Z]+)$").expect("valid regex")
});

/// The number in a numbered road (`43`, `116`, `9W`).
static ROAD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[A-Z]?$").expect("valid regex"));

/// A word that may appear in a city name.
static CITY_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}[\p{L}'.\-]*$").expect("valid regex"));

/// Leading words of a numbered road (`County Road 43`).
const NUMBERED_ROAD_LEADS: &[&str] = &["COUNTY", "STATE", "US"];

/// Key sequences that introduce a post office box number.
const PO_BOX_LEADS: &[&[&str]] = &[
    &["PO", "BOX"],
    &["P", "O", "BOX"],
    &["POST", "OFFICE", "BOX"],
    &["POBOX"],
];

/// The street portion of an address: `[prefix] name [type] [suffix]`.
#[derive(Debug, Clone, Copy)]
pub struct StreetSpan<'a> {
    pub prefix: Option<&'a Token>,
    pub name: &'a [Token],
    pub street_type: Option<&'a Token>,
    pub suffix: Option<&'a Token>,
    /// The name is a numbered road that embeds its type word.
    pub numbered_road: bool,
    /// Tokens consumed from the start of the region.
    pub len: usize,
}

/// A secondary unit with its designator already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit {
    pub prefix: Option<&'static str>,
    pub id: Option<String>,
    /// A bare number right after the street type.
    pub implicit: bool,
}

/// Everything up to and including the house number.
#[derive(Debug, Clone)]
pub struct Head<'a> {
    pub unit: Option<RawUnit>,
    pub number: Option<&'a Token>,
    /// Box number of a post office box address.
    pub po_box: Option<&'a Token>,
    /// Index of the first token after the head.
    pub next: usize,
}

/// A recognized state span ending at the place boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSpan {
    pub start: usize,
    pub end: usize,
    pub code: &'static str,
}

#[must_use]
pub fn is_postal(token: &Token) -> bool {
    POSTAL_RE.is_match(&token.key)
}

/// Splits a postal code token into its base and extension by position.
#[must_use]
pub fn split_postal(token: &Token) -> Option<(String, Option<String>)> {
    let caps = POSTAL_RE.captures(&token.key)?;
    Some((caps[1].to_string(), caps.get(2).map(|m| m.as_str().to_string())))
}

#[must_use]
pub fn is_fraction(token: &Token) -> bool {
    FRACTION_RE.is_match(&token.key)
}

fn unit_id(token: &Token) -> Option<String> {
    let id = token.key.strip_prefix('#').unwrap_or(&token.key);
    UNIT_ID_RE.is_match(id).then(|| id.to_string())
}

/// An explicitly marked unit starting at `i`: `#207`, `# 207`,
/// `Apt D304`, or an unnumbered designator such as `lobby`.
///
/// Returns the unit and the number of tokens it spans.
#[must_use]
pub fn unit_at(tokens: &[Token], i: usize) -> Option<(RawUnit, usize)> {
    let token = tokens.get(i)?;
    let following = tokens.get(i + 1).filter(|t| !t.comma_before);

    if let Some(rest) = token.key.strip_prefix('#') {
        if !rest.is_empty() {
            let id = UNIT_ID_RE.is_match(rest).then(|| rest.to_string())?;
            return Some((marked("#", id), 1));
        }
        let id = following.and_then(unit_id)?;
        return Some((marked("#", id), 2));
    }

    let designator = tables::unit_designator(&token.key)?;
    if !designator.numbered {
        let unit = RawUnit {
            prefix: Some(designator.canonical),
            id: None,
            implicit: false,
        };
        return Some((unit, 1));
    }

    let mut id = following.and_then(unit_id)?;
    let mut len = 2;
    if let Some(glued) = tokens.get(i + 2).filter(|t| t.glued) {
        id.push_str(&glued.key);
        len += 1;
    }
    Some((marked(designator.canonical, id), len))
}

const fn marked(prefix: &'static str, id: String) -> RawUnit {
    RawUnit {
        prefix: Some(prefix),
        id: Some(id),
        implicit: false,
    }
}

/// A unit directly after the street span. Besides the marked forms, a
/// bare number right after a street type is an implicit unit.
#[must_use]
pub fn unit_after(rest: &[Token], has_street_type: bool) -> Option<(RawUnit, usize)> {
    if let Some(found) = unit_at(rest, 0) {
        return Some(found);
    }
    let token = rest.first()?;
    if has_street_type && !token.comma_before && token.is_digits() {
        let unit = RawUnit {
            prefix: None,
            id: Some(token.key.clone()),
            implicit: true,
        };
        return Some((unit, 1));
    }
    None
}

/// `PO Box 123` and its spellings starting at `i`. Returns the box number
/// token and the number of tokens spanned.
fn po_box_at(tokens: &[Token], i: usize) -> Option<(&Token, usize)> {
    PO_BOX_LEADS.iter().find_map(|lead| {
        let words = tokens.get(i..i + lead.len())?;
        if words.iter().zip(lead.iter()).any(|(t, k)| t.key != *k) {
            return None;
        }
        let number = tokens.get(i + lead.len()).filter(|t| t.is_digits())?;
        Some((number, lead.len() + 1))
    })
}

/// `[unit-marker] (number [fraction] | po-box)`.
///
/// A unit marker is only taken as leading when a house number follows it.
#[must_use]
pub fn head<'a>(tokens: &'a [Token], leading: Option<&LeadingUnit>) -> Option<Head<'a>> {
    let mut pos = 0;
    let mut unit = leading.map(|l| marked(l.designator, l.id.clone()));

    if unit.is_none()
        && let Some((found, len)) = unit_at(tokens, 0)
        && tokens.get(len).is_some_and(Token::is_digits)
    {
        unit = Some(found);
        pos = len;
    }

    if let Some((po_box, len)) = po_box_at(tokens, pos) {
        return Some(Head {
            unit,
            number: None,
            po_box: Some(po_box),
            next: pos + len,
        });
    }

    let number = tokens.get(pos).filter(|t| t.is_digits())?;
    pos += 1;
    if tokens.get(pos).is_some_and(is_fraction) {
        pos += 1;
    }

    Some(Head {
        unit,
        number: Some(number),
        po_box: None,
        next: pos,
    })
}

/// A postal code in the last token, if one sits at or after `lo`.
/// Returns the new end of the unclaimed tokens.
#[must_use]
pub fn take_postal(tokens: &[Token], lo: usize) -> (usize, Option<&Token>) {
    match tokens.last() {
        Some(last) if tokens.len() > lo && is_postal(last) => (tokens.len() - 1, Some(last)),
        _ => (tokens.len(), None),
    }
}

/// The longest state name (up to three words) ending at `end` and
/// starting no earlier than `lo`. A multi-word name must sit within one
/// comma group.
#[must_use]
pub fn take_state(tokens: &[Token], lo: usize, end: usize) -> Option<StateSpan> {
    (1..=3).rev().find_map(|len| {
        let start = end.checked_sub(len).filter(|s| *s >= lo)?;
        let words = &tokens[start..end];
        if words[1..].iter().any(|t| t.comma_before) {
            return None;
        }
        let key = words
            .iter()
            .map(|t| t.key.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        tables::state(&key).map(|code| StateSpan { start, end, code })
    })
}

/// Whether the tokens can form a city: word tokens within one comma group.
#[must_use]
pub fn valid_city(tokens: &[Token]) -> bool {
    !tokens.is_empty()
        && tokens[1..].iter().all(|t| !t.comma_before)
        && tokens.iter().all(|t| CITY_WORD_RE.is_match(&t.text))
}

/// Parses the street span at the start of `region`.
///
/// With `greedy` set, a street without a type takes every token of its
/// segment as the name; otherwise it takes a single token.
#[must_use]
pub fn street_span(region: &[Token], greedy: bool) -> Option<StreetSpan<'_>> {
    street_span_where(region, greedy, |_| false)
}

/// Like [`street_span`], but a street type run may end before a word
/// that opens a city when `place_follows` accepts the shorter street.
#[must_use]
pub fn street_span_where<'a>(
    region: &'a [Token],
    greedy: bool,
    place_follows: impl Fn(&StreetSpan<'a>) -> bool,
) -> Option<StreetSpan<'a>> {
    let first = region.first()?;
    let prefix_possible =
        tables::directional(&first.key).is_some() && region.get(1).is_some_and(|t| !t.comma_before);

    if prefix_possible
        && let Some(span) = span_from(region, 1, greedy, &place_follows)
        && ambiguity::leading_directional(&span) == LeadingDirectional::Prefix
    {
        return Some(StreetSpan {
            prefix: Some(first),
            ..span
        });
    }

    span_from(region, 0, greedy, &place_follows).filter(valid_name)
}

/// Index where the street segment starting at `start` ends: the first
/// comma or explicit unit marker after the first name token.
fn segment_end(region: &[Token], start: usize) -> usize {
    (start + 1..region.len())
        .find(|&i| region[i].comma_before || unit_at(region, i).is_some())
        .unwrap_or(region.len())
}

fn span_from<'a>(
    region: &'a [Token],
    start: usize,
    greedy: bool,
    place_follows: &dyn Fn(&StreetSpan<'a>) -> bool,
) -> Option<StreetSpan<'a>> {
    let end = segment_end(region, start);
    let segment = region.get(start..end).filter(|s| !s.is_empty())?;
    let typed = |at: usize| finish_span(region, start, end, at, Some(&segment[at]), false);

    if let Some(len) = numbered_road_len(segment) {
        return Some(finish_span(region, start, end, len, Some(&segment[1]), true));
    }
    if let Some(at) = ambiguity::street_type_position(segment, |at| place_follows(&typed(at))) {
        return Some(typed(at));
    }

    let name_len = if greedy {
        let trailing_directional = segment.len() > 1
            && segment
                .last()
                .is_some_and(|t| tables::directional(&t.key).is_some());
        segment.len() - usize::from(trailing_directional)
    } else {
        1
    };
    Some(finish_span(region, start, end, name_len, None, false))
}

/// Builds the span whose name covers `name_len` tokens of the segment
/// `start..end`, taking a suffix directional after the type when one is
/// there.
fn finish_span<'a>(
    region: &'a [Token],
    start: usize,
    end: usize,
    name_len: usize,
    street_type: Option<&'a Token>,
    numbered_road: bool,
) -> StreetSpan<'a> {
    let name_end = start + name_len;
    let mut next = name_end + usize::from(street_type.is_some() && !numbered_road);
    let suffix = region[next..end]
        .first()
        .filter(|t| ambiguity::is_suffix(t));
    if suffix.is_some() {
        next += 1;
    }

    StreetSpan {
        prefix: None,
        name: &region[start..name_end],
        street_type,
        suffix,
        numbered_road,
        len: next,
    }
}

/// `STATE|COUNTY|US` + road type + road number.
fn numbered_road_len(segment: &[Token]) -> Option<usize> {
    let [lead, kind, number, ..] = segment else {
        return None;
    };
    let matches = NUMBERED_ROAD_LEADS.contains(&lead.key.as_str())
        && ambiguity::carries_road_number(kind)
        && ROAD_NUMBER_RE.is_match(&number.key);
    matches.then_some(3)
}

/// Name tokens must be words or numbers, and a street with no type may
/// not be a lone abbreviated directional.
#[must_use]
pub fn valid_name(span: &StreetSpan<'_>) -> bool {
    let words_ok = span
        .name
        .iter()
        .all(|t| !t.is_connector() && !t.key.starts_with('#'));
    let lone_directional = span.street_type.is_none()
        && matches!(span.name, [only] if tables::directional(&only.key) == Some(only.key.as_str()));
    !span.name.is_empty() && words_ok && !lone_directional
}
