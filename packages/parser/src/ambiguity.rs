//! Tie-breaks for the places where one token sequence has more than one
//! grammatical reading.
//!
//! Every decision lives in its own function so the grammar code never
//! resolves an ambiguity implicitly through match order.

use crate::grammar::{self, StreetSpan};
use crate::tables;
use crate::token::Token;

/// How a directional at the start of the street region is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingDirectional {
    /// `N` in `N Main St`.
    Prefix,
    /// `South` in `South St`.
    StreetName,
}

/// Decides whether a leading directional is a prefix, given the span the
/// tokens after it would form.
///
/// It is a prefix only when those tokens still make a street on their
/// own. A lone street type word (`N Ave`) or an invalid name sends the
/// directional back into the street name.
#[must_use]
pub fn leading_directional(rest: &StreetSpan<'_>) -> LeadingDirectional {
    let lone_type_word = rest.street_type.is_none()
        && matches!(rest.name, [only] if tables::street_type(&only.key).is_some());
    if lone_type_word || !grammar::valid_name(rest) {
        LeadingDirectional::StreetName
    } else {
        LeadingDirectional::Prefix
    }
}

/// Canonical street types that commonly open a city name (`Fort Worth`,
/// `Park City`, `Mill Valley`, `St Louis`).
const CITY_OPENING_TYPES: &[&str] = &[
    "Fls", "Frst", "Ft", "Gdn", "Gln", "Grn", "Grv", "Hbr", "Is", "Ky", "Lk", "Ml", "Mt", "Park",
    "Prt", "Pt", "St", "Un", "Vly",
];

/// Canonical street types that carry a road number (`County Road 43`).
const NUMBERED_ROAD_TYPES: &[&str] = &["Hwy", "Rd", "Rte"];

/// Picks the street type inside a street segment, returning its index.
///
/// The first type word with at least one name word before it is taken.
/// While that word is spelled out and the next word is also a type, the
/// choice moves right, so `Mill Station Rd` keeps `Station` in the name
/// and `Canal Center Plaza` ends on `Plaza`. An abbreviation always ends
/// the run.
///
/// The run stops early when the next word commonly opens a city name
/// and `place_follows` accepts the street ending at the current word,
/// so `Main Street Fort Worth TX` keeps `Fort Worth` as the city.
#[must_use]
pub fn street_type_position(
    segment: &[Token],
    mut place_follows: impl FnMut(usize) -> bool,
) -> Option<usize> {
    let mut at = (1..segment.len()).find(|&i| tables::street_type(&segment[i].key).is_some())?;
    loop {
        let spelled_out = tables::street_type(&segment[at].key).is_some_and(|m| m.spelled_out);
        let Some(next) = segment
            .get(at + 1)
            .and_then(|t| tables::street_type(&t.key))
            .filter(|_| spelled_out)
        else {
            return Some(at);
        };
        if CITY_OPENING_TYPES.contains(&next.canonical) && place_follows(at) {
            log::trace!("street type run stops before city word `{}`", segment[at + 1].text);
            return Some(at);
        }
        at += 1;
    }
}

/// Whether `kind` is a type word that takes a road number after it, as
/// in `State Highway 116`. `State St 5` is a street named State with an
/// implicit unit instead.
#[must_use]
pub fn carries_road_number(kind: &Token) -> bool {
    tables::street_type(&kind.key).is_some_and(|m| NUMBERED_ROAD_TYPES.contains(&m.canonical))
}

/// A directional following the street with no comma in between is the
/// street's suffix.
#[must_use]
pub fn is_suffix(token: &Token) -> bool {
    !token.comma_before && tables::directional(&token.key).is_some()
}

/// A directional that opens a city of two or more words belongs to the
/// city (`e San Jose` → `East San Jose`). Returns its canonical form.
#[must_use]
pub fn city_leading_directional(city: &[Token]) -> Option<&'static str> {
    match city {
        [first, _, ..] => tables::directional(&first.key),
        _ => None,
    }
}

/// How a trailing token found in both the state and the street type
/// table (`CT`, `KY`, `MT`) is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOrStreetType {
    State,
    StreetType,
}

/// Reads the token as a state unless doing so leaves a street with no
/// type and no city, as in `100 Main Ct`.
#[must_use]
pub fn state_or_street_type(
    state_tokens: &[Token],
    street_has_type: bool,
    has_city: bool,
) -> StateOrStreetType {
    let doubles_as_type =
        matches!(state_tokens, [only] if tables::street_type(&only.key).is_some());
    if doubles_as_type && !street_has_type && !has_city {
        StateOrStreetType::StreetType
    } else {
        StateOrStreetType::State
    }
}

/// How a state code that is also a directional (`NE`) is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOrSuffix {
    State,
    Suffix,
}

/// `NE` right after the street, with no city before it and a postal code
/// after it, is the street's suffix (`233 S Wacker Dr NE 60606`).
#[must_use]
pub fn state_or_suffix(
    state_tokens: &[Token],
    street_has_suffix: bool,
    has_city: bool,
    has_postal: bool,
) -> StateOrSuffix {
    let directional = matches!(
        state_tokens,
        [only] if !only.comma_before && tables::directional(&only.key).is_some()
    );
    if directional && !street_has_suffix && !has_city && has_postal {
        StateOrSuffix::Suffix
    } else {
        StateOrSuffix::State
    }
}

/// The type the first street of an intersection borrows from the second.
///
/// `Mission & Valencia Sts` shares `St` because the second type is
/// plural and the first street has none of its own.
#[must_use]
pub fn shared_street_type(first: &StreetSpan<'_>, second: &StreetSpan<'_>) -> Option<&'static str> {
    if first.street_type.is_some() {
        return None;
    }
    let found = tables::street_type(&second.street_type?.key)?;
    found.plural.then_some(found.canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::street_span;
    use crate::token::tokenize;

    fn keys(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.key.as_str()).collect()
    }

    #[test]
    fn directional_before_street_is_prefix() {
        let tokens = tokenize("Wacker Dr");
        let rest = street_span(&tokens, false).unwrap();
        assert_eq!(leading_directional(&rest), LeadingDirectional::Prefix);
    }

    #[test]
    fn directional_before_lone_type_is_street_name() {
        let tokens = tokenize("St");
        let rest = street_span(&tokens, false).unwrap();
        assert_eq!(leading_directional(&rest), LeadingDirectional::StreetName);

        let tokens = tokenize("South St");
        let span = street_span(&tokens, false).unwrap();
        assert_eq!(span.prefix, None);
        assert_eq!(keys(span.name), ["SOUTH"]);
        assert_eq!(span.street_type.map(|t| t.key.as_str()), Some("ST"));
    }

    #[test]
    fn street_type_run_moves_past_spelled_out_types() {
        let tokens = tokenize("Mill Station Rd");
        assert_eq!(street_type_position(&tokens, |_| true), Some(2));

        let tokens = tokenize("Canal Center Plaza");
        assert_eq!(street_type_position(&tokens, |_| true), Some(2));
    }

    #[test]
    fn street_type_run_stops_at_abbreviation() {
        let tokens = tokenize("Park Ave Plaza");
        assert_eq!(street_type_position(&tokens, |_| false), Some(1));
    }

    #[test]
    fn street_type_run_stops_before_city_word() {
        for input in [
            "Main Street Fort Worth",
            "Main Street Park City",
            "Gravenstein Highway Mill Valley",
        ] {
            let tokens = tokenize(input);
            assert_eq!(street_type_position(&tokens, |_| true), Some(1), "{input}");
        }
    }

    #[test]
    fn street_type_run_continues_without_a_place() {
        let tokens = tokenize("Main Street Park");
        let mut asked = Vec::new();
        let at = street_type_position(&tokens, |at| {
            asked.push(at);
            false
        });
        assert_eq!(at, Some(2));
        assert_eq!(asked, [1]);
    }

    #[test]
    fn street_type_needs_a_name_before_it() {
        assert_eq!(street_type_position(&tokenize("Park"), |_| false), None);
        assert_eq!(street_type_position(&tokenize("Park Ave"), |_| false), Some(1));
        assert_eq!(street_type_position(&tokenize("Broadway"), |_| false), None);
    }

    #[test]
    fn only_road_types_take_road_numbers() {
        let tokens = tokenize("Highway Hwy Road Route Rte St Ave");
        let carries: Vec<bool> = tokens.iter().map(carries_road_number).collect();
        assert_eq!(carries, [true, true, true, true, true, false, false]);
    }

    #[test]
    fn directional_after_comma_is_not_suffix() {
        let tokens = tokenize("St E, N Springfield");
        assert!(is_suffix(&tokens[1]));
        assert!(!is_suffix(&tokens[2]));
    }

    #[test]
    fn directional_opens_multi_word_city() {
        assert_eq!(city_leading_directional(&tokenize("e San Jose")), Some("E"));
        assert_eq!(city_leading_directional(&tokenize("North")), None);
        assert_eq!(city_leading_directional(&tokenize("San Jose")), None);
    }

    #[test]
    fn state_code_that_is_a_street_type() {
        let ct = tokenize("Ct");
        assert_eq!(
            state_or_street_type(&ct, false, false),
            StateOrStreetType::StreetType
        );
        assert_eq!(state_or_street_type(&ct, true, false), StateOrStreetType::State);
        assert_eq!(state_or_street_type(&ct, false, true), StateOrStreetType::State);
        assert_eq!(
            state_or_street_type(&tokenize("IL"), false, false),
            StateOrStreetType::State
        );
    }

    #[test]
    fn directional_state_code_before_postal_code_is_suffix() {
        let ne = tokenize("NE");
        assert_eq!(state_or_suffix(&ne, false, false, true), StateOrSuffix::Suffix);
        assert_eq!(state_or_suffix(&ne, false, false, false), StateOrSuffix::State);
        assert_eq!(state_or_suffix(&ne, false, true, true), StateOrSuffix::State);
        assert_eq!(state_or_suffix(&ne, true, false, true), StateOrSuffix::State);
        assert_eq!(
            state_or_suffix(&tokenize("IL"), false, false, true),
            StateOrSuffix::State
        );
        let after_comma = tokenize("Dr, NE");
        assert_eq!(
            state_or_suffix(&after_comma[1..], false, false, true),
            StateOrSuffix::State
        );
    }

    #[test]
    fn plural_second_type_is_shared() {
        let first = tokenize("Mission");
        let second = tokenize("Valencia Sts");
        let first = street_span(&first, true).unwrap();
        let second = street_span(&second, false).unwrap();
        assert_eq!(shared_street_type(&first, &second), Some("St"));
    }

    #[test]
    fn singular_second_type_is_not_shared() {
        let first = tokenize("Mission");
        let second = tokenize("Valencia St");
        let first = street_span(&first, true).unwrap();
        let second = street_span(&second, false).unwrap();
        assert_eq!(shared_street_type(&first, &second), None);
    }
}
