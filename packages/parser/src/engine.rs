//! Applies the grammars in precedence order.
//!
//! Each grammar is a plain function over the token slice. A grammar
//! either consumes every token (apart from the trailing text the informal
//! grammar tolerates) or reports no match; there is no backtracking
//! between grammars.

use street_sweeper_models::ParseOptions;
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::ambiguity::{self, StateOrStreetType, StateOrSuffix};
use crate::grammar::{self, Head, RawUnit, StateSpan, StreetSpan};
use crate::preprocess::LeadingUnit;
use crate::token::Token;

/// The top-level grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Grammar {
    /// Street plus at least one trailing unit or place component.
    Standard,
    /// Two streets joined by `&` or `and`.
    Intersection,
    /// Number and street only; trailing text is discarded.
    Informal,
}

/// Captures of a single-street grammar.
#[derive(Debug, Clone)]
pub struct RawAddress<'a> {
    pub unit: Option<RawUnit>,
    pub number: Option<&'a Token>,
    pub po_box: Option<&'a Token>,
    pub street: Option<StreetSpan<'a>>,
    pub city: &'a [Token],
    pub state: Option<&'static str>,
    pub postal: Option<&'a Token>,
}

/// Captures of the intersection grammar.
#[derive(Debug, Clone)]
pub struct RawIntersection<'a> {
    pub first: StreetSpan<'a>,
    pub second: StreetSpan<'a>,
    /// Type borrowed by the first street from a plural second type.
    pub shared_type: Option<&'static str>,
    pub city: &'a [Token],
    pub state: Option<&'static str>,
    pub postal: Option<&'a Token>,
}

#[derive(Debug, Clone)]
pub enum RawMatch<'a> {
    Address(RawAddress<'a>),
    Intersection(RawIntersection<'a>),
}

/// The grammars to try for this input, in order.
///
/// Standard always runs first. Intersection follows when the input holds
/// a connector, then Informal when the options enable it.
#[must_use]
pub fn attempts(tokens: &[Token], options: &ParseOptions) -> Vec<Grammar> {
    let mut order = vec![Grammar::Standard];
    if tokens.iter().any(Token::is_connector) {
        order.push(Grammar::Intersection);
    }
    if options.informal {
        order.push(Grammar::Informal);
    }
    order
}

/// Matches one grammar against the whole token sequence.
#[must_use]
pub fn match_grammar<'a>(
    grammar: Grammar,
    tokens: &'a [Token],
    leading: Option<&LeadingUnit>,
) -> Option<RawMatch<'a>> {
    let raw = match grammar {
        Grammar::Standard => standard(tokens, leading).map(RawMatch::Address),
        Grammar::Informal => informal(tokens, leading).map(RawMatch::Address),
        Grammar::Intersection => intersection(tokens).map(RawMatch::Intersection),
    };
    log::trace!(
        "{grammar} grammar {}",
        if raw.is_some() { "matched" } else { "did not match" }
    );
    raw
}

fn standard<'a>(tokens: &'a [Token], leading: Option<&LeadingUnit>) -> Option<RawAddress<'a>> {
    let head = grammar::head(tokens, leading)?;
    let lo = head.next + usize::from(head.po_box.is_none());
    let (end, postal) = grammar::take_postal(tokens, lo);
    let state = grammar::take_state(tokens, lo, end);

    let with_state = standard_place(tokens, &head, end, postal, state);
    let Some(span) = state else {
        return with_state;
    };

    if let Some(raw) = &with_state
        && ambiguity::state_or_suffix(
            &tokens[span.start..span.end],
            raw.street.is_some_and(|s| s.suffix.is_some()),
            !raw.city.is_empty(),
            postal.is_some(),
        ) == StateOrSuffix::Suffix
        && let Some(retry) = standard_place(tokens, &head, end, postal, None)
            .filter(|retry| retry.street.is_some_and(|s| s.suffix.is_some()))
    {
        log::debug!("reading `{}` as a street suffix", tokens[span.start].text);
        return Some(retry);
    }

    let reading = with_state
        .as_ref()
        .map_or(StateOrStreetType::StreetType, |raw| {
            ambiguity::state_or_street_type(
                &tokens[span.start..span.end],
                raw.street.is_some_and(|s| s.street_type.is_some()),
                !raw.city.is_empty(),
            )
        });
    match reading {
        StateOrStreetType::State => with_state,
        StateOrStreetType::StreetType => {
            log::debug!("reading `{}` as a street type", tokens[span.start].text);
            standard_place(tokens, &head, end, postal, None).or(with_state)
        }
    }
}

/// The rest of a standard address once the place boundary is fixed.
fn standard_place<'a>(
    tokens: &'a [Token],
    head: &Head<'a>,
    end: usize,
    postal: Option<&'a Token>,
    state: Option<StateSpan>,
) -> Option<RawAddress<'a>> {
    let region = &tokens[head.next..state.map_or(end, |s| s.start)];
    let place = |street: Option<StreetSpan<'a>>| {
        let rest = &region[street.map_or(0, |s| s.len)..];
        after_street(head, street, rest, state, postal)
    };

    if head.po_box.is_some() {
        return place(None);
    }
    let street = grammar::street_span_where(region, false, |span| {
        place(Some(*span)).is_some_and(|raw| !raw.city.is_empty())
    })?;
    place(Some(street))
}

/// Trailing unit and city after the street. A city needs a state, and
/// something must follow the street.
fn after_street<'a>(
    head: &Head<'a>,
    street: Option<StreetSpan<'a>>,
    rest: &'a [Token],
    state: Option<StateSpan>,
    postal: Option<&'a Token>,
) -> Option<RawAddress<'a>> {
    let trailing = street.and_then(|span| grammar::unit_after(rest, span.street_type.is_some()));
    let consumed = trailing.as_ref().map_or(0, |(_, len)| *len);
    let city = &rest[consumed..];

    if !city.is_empty() && (state.is_none() || !grammar::valid_city(city)) {
        return None;
    }
    if trailing.is_none() && city.is_empty() && state.is_none() && postal.is_none() {
        return None;
    }

    Some(RawAddress {
        unit: head.unit.clone().or_else(|| trailing.map(|(unit, _)| unit)),
        number: head.number,
        po_box: head.po_box,
        street,
        city,
        state: state.map(|s| s.code),
        postal,
    })
}

fn informal<'a>(tokens: &'a [Token], leading: Option<&LeadingUnit>) -> Option<RawAddress<'a>> {
    let head = grammar::head(tokens, leading)?;
    let region = &tokens[head.next..];

    let mut unit = head.unit.clone();
    let street = if head.po_box.is_some() {
        None
    } else {
        let span = grammar::street_span(region, false)?;
        if unit.is_none() {
            unit = grammar::unit_after(&region[span.len..], span.street_type.is_some())
                .map(|(found, _)| found);
        }
        Some(span)
    };

    Some(RawAddress {
        unit,
        number: head.number,
        po_box: head.po_box,
        street,
        city: &[],
        state: None,
        postal: None,
    })
}

fn intersection(tokens: &[Token]) -> Option<RawIntersection<'_>> {
    let at = tokens.iter().position(Token::is_connector)?;
    let left = &tokens[..at];
    let right = &tokens[at + 1..];
    if left.first()?.is_digits() || right.is_empty() {
        return None;
    }

    let first = grammar::street_span(left, true).filter(|span| span.len == left.len())?;

    let (end, postal) = grammar::take_postal(right, 1);
    let state = grammar::take_state(right, 1, end);
    let region = &right[..state.map_or(end, |s| s.start)];
    let second = grammar::street_span_where(region, false, |span| {
        state.is_some() && grammar::valid_city(&region[span.len..])
    })?;
    let city = &region[second.len..];

    if !city.is_empty() && (state.is_none() || !grammar::valid_city(city)) {
        return None;
    }

    Some(RawIntersection {
        shared_type: ambiguity::shared_street_type(&first, &second),
        first,
        second,
        city,
        state: state.map(|s| s.code),
        postal,
    })
}
