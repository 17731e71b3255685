#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the street-sweeper address parser.
//!
//! This crate contains only the record types, the parts they are built
//! from, and the parse options. It does no parsing and has no
//! heavyweight dependencies.
//!
//! Records are constructed once through [`TryFrom`] on their parts type,
//! which checks the record invariants, and expose read-only accessors
//! afterwards. A record that fails the checks is never produced.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options recognized by the parse entry points.
///
/// Unknown keys are rejected when deserializing, so a typo in an options
/// file fails before any input is matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    /// Falls back to the informal grammar (street-level only, trailing
    /// text tolerated) when the standard grammar finds no address.
    pub informal: bool,
    /// Drops `street_type` when the street name already embeds the type
    /// word, as in "County Road 43".
    pub avoid_redundant_street_type: bool,
}

/// An assembled record broke one of the record invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The street name is empty.
    #[error("street name is empty")]
    EmptyStreet,

    /// The postal code is not exactly five digits.
    #[error("postal code {0:?} is not five digits")]
    InvalidPostalCode(String),

    /// The postal code extension is not exactly four digits.
    #[error("postal code extension {0:?} is not four digits")]
    InvalidPostalCodeExt(String),

    /// A postal code extension was given without a postal code.
    #[error("postal code extension present without a postal code")]
    ExtWithoutPostalCode,

    /// The state is not a two-letter uppercase code.
    #[error("state {0:?} is not a two-letter code")]
    InvalidState(String),

    /// A unit identifier has neither a designator nor an implicit marker.
    #[error("unit {0:?} has no designator or marker")]
    UnmarkedUnit(String),

    /// An optional field was present but held an empty string.
    #[error("field `{0}` is present but empty")]
    EmptyField(&'static str),
}

/// Resolved fields for a single-street address, prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    /// House number (integer part only).
    pub number: Option<String>,
    /// Directional before the street name.
    pub prefix: Option<String>,
    /// Canonical, title-cased street name.
    pub street: String,
    /// Canonical street type abbreviation.
    pub street_type: Option<String>,
    /// Directional after the street name.
    pub suffix: Option<String>,
    /// Secondary unit designator (`Apt`, `Ste`, `#`, ...).
    pub unit_prefix: Option<String>,
    /// Secondary unit identifier.
    pub unit: Option<String>,
    /// Whether `unit` was a bare number right after the street type.
    pub implicit_unit: bool,
    /// Title-cased city.
    pub city: Option<String>,
    /// Two-letter state code.
    pub state: Option<String>,
    /// Five-digit postal code.
    pub postal_code: Option<String>,
    /// Four-digit postal code extension.
    pub postal_code_ext: Option<String>,
}

/// A parsed single-street address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressRecord {
    number: Option<String>,
    prefix: Option<String>,
    street: String,
    street_type: Option<String>,
    suffix: Option<String>,
    unit_prefix: Option<String>,
    unit: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    postal_code_ext: Option<String>,
}

impl TryFrom<AddressParts> for AddressRecord {
    type Error = RecordError;

    fn try_from(parts: AddressParts) -> Result<Self, Self::Error> {
        if parts.street.trim().is_empty() {
            return Err(RecordError::EmptyStreet);
        }
        check_present("number", parts.number.as_deref())?;
        check_present("prefix", parts.prefix.as_deref())?;
        check_present("street_type", parts.street_type.as_deref())?;
        check_present("suffix", parts.suffix.as_deref())?;
        check_present("unit_prefix", parts.unit_prefix.as_deref())?;
        check_present("unit", parts.unit.as_deref())?;
        check_present("city", parts.city.as_deref())?;
        check_state(parts.state.as_deref())?;
        check_postal_code(
            parts.postal_code.as_deref(),
            parts.postal_code_ext.as_deref(),
        )?;

        if let Some(unit) = &parts.unit
            && parts.unit_prefix.is_none()
            && !parts.implicit_unit
        {
            return Err(RecordError::UnmarkedUnit(unit.clone()));
        }

        Ok(Self {
            number: parts.number,
            prefix: parts.prefix,
            street: parts.street,
            street_type: parts.street_type,
            suffix: parts.suffix,
            unit_prefix: parts.unit_prefix,
            unit: parts.unit,
            city: parts.city,
            state: parts.state,
            postal_code: parts.postal_code,
            postal_code_ext: parts.postal_code_ext,
        })
    }
}

impl AddressRecord {
    /// House number, without any fractional part.
    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Directional before the street name (`N`, `SE`, ...).
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Canonical street name. Never empty.
    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Canonical street type abbreviation (`St`, `Ave`, ...).
    #[must_use]
    pub fn street_type(&self) -> Option<&str> {
        self.street_type.as_deref()
    }

    /// Directional after the street name.
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Secondary unit designator (`Apt`, `Ste`, `Lot`, `#`, ...).
    #[must_use]
    pub fn unit_prefix(&self) -> Option<&str> {
        self.unit_prefix.as_deref()
    }

    /// Secondary unit identifier.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Two-letter state code.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    #[must_use]
    pub fn postal_code_ext(&self) -> Option<&str> {
        self.postal_code_ext.as_deref()
    }

    /// Postal code with its extension attached (`"60606-6306"`).
    #[must_use]
    pub fn full_postal_code(&self) -> Option<String> {
        full_postal_code(self.postal_code.as_deref(), self.postal_code_ext.as_deref())
    }

    /// The street line: number, directionals, street, type and unit.
    #[must_use]
    pub fn line1(&self) -> String {
        let mut parts: Vec<&str> = [
            self.number(),
            self.prefix(),
            Some(self.street()),
            self.street_type(),
            self.suffix(),
        ]
        .into_iter()
        .flatten()
        .collect();

        let unit = match (self.unit_prefix(), self.unit()) {
            (Some("#"), Some(unit)) => Some(format!("#{unit}")),
            (Some(prefix), Some(unit)) => Some(format!("{prefix} {unit}")),
            (Some(prefix), None) => Some(prefix.to_string()),
            (None, Some(unit)) => Some(unit.to_string()),
            (None, None) => None,
        };
        if let Some(unit) = &unit {
            parts.push(unit);
        }

        parts.join(" ")
    }

    /// The place line: `City, ST 12345-6789`.
    #[must_use]
    pub fn line2(&self) -> String {
        place_line(
            self.city(),
            self.state(),
            self.full_postal_code().as_deref(),
        )
    }
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line2 = self.line2();
        if line2.is_empty() {
            write!(f, "{}", self.line1())
        } else {
            write!(f, "{}, {line2}", self.line1())
        }
    }
}

/// Resolved fields for an intersection, prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntersectionParts {
    pub street: String,
    pub street_type: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub street2: String,
    pub street_type2: Option<String>,
    pub prefix2: Option<String>,
    pub suffix2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub postal_code_ext: Option<String>,
}

/// A parsed intersection of two streets.
///
/// Carries no house number and no unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntersectionRecord {
    street: String,
    street_type: Option<String>,
    prefix: Option<String>,
    suffix: Option<String>,
    street2: String,
    street_type2: Option<String>,
    prefix2: Option<String>,
    suffix2: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    postal_code_ext: Option<String>,
}

impl TryFrom<IntersectionParts> for IntersectionRecord {
    type Error = RecordError;

    fn try_from(parts: IntersectionParts) -> Result<Self, Self::Error> {
        if parts.street.trim().is_empty() || parts.street2.trim().is_empty() {
            return Err(RecordError::EmptyStreet);
        }
        check_present("street_type", parts.street_type.as_deref())?;
        check_present("street_type2", parts.street_type2.as_deref())?;
        check_present("city", parts.city.as_deref())?;
        check_state(parts.state.as_deref())?;
        check_postal_code(
            parts.postal_code.as_deref(),
            parts.postal_code_ext.as_deref(),
        )?;

        Ok(Self {
            street: parts.street,
            street_type: parts.street_type,
            prefix: parts.prefix,
            suffix: parts.suffix,
            street2: parts.street2,
            street_type2: parts.street_type2,
            prefix2: parts.prefix2,
            suffix2: parts.suffix2,
            city: parts.city,
            state: parts.state,
            postal_code: parts.postal_code,
            postal_code_ext: parts.postal_code_ext,
        })
    }
}

impl IntersectionRecord {
    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    #[must_use]
    pub fn street_type(&self) -> Option<&str> {
        self.street_type.as_deref()
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    #[must_use]
    pub fn street2(&self) -> &str {
        &self.street2
    }

    #[must_use]
    pub fn street_type2(&self) -> Option<&str> {
        self.street_type2.as_deref()
    }

    #[must_use]
    pub fn prefix2(&self) -> Option<&str> {
        self.prefix2.as_deref()
    }

    #[must_use]
    pub fn suffix2(&self) -> Option<&str> {
        self.suffix2.as_deref()
    }

    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    #[must_use]
    pub fn postal_code_ext(&self) -> Option<&str> {
        self.postal_code_ext.as_deref()
    }
}

impl fmt::Display for IntersectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = corner_line(self.prefix(), self.street(), self.street_type(), self.suffix());
        let second = corner_line(
            self.prefix2(),
            self.street2(),
            self.street_type2(),
            self.suffix2(),
        );

        let postal = full_postal_code(self.postal_code(), self.postal_code_ext());
        let line2 = place_line(self.city(), self.state(), postal.as_deref());
        if line2.is_empty() {
            write!(f, "{first} & {second}")
        } else {
            write!(f, "{first} & {second}, {line2}")
        }
    }
}

/// Either kind of parse result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedLocation {
    /// A single-street address.
    Address(AddressRecord),
    /// Two streets joined by a connector.
    Intersection(IntersectionRecord),
}

impl ParsedLocation {
    /// Returns the address record, if this is one.
    #[must_use]
    pub const fn as_address(&self) -> Option<&AddressRecord> {
        match self {
            Self::Address(record) => Some(record),
            Self::Intersection(_) => None,
        }
    }

    /// Returns the intersection record, if this is one.
    #[must_use]
    pub const fn as_intersection(&self) -> Option<&IntersectionRecord> {
        match self {
            Self::Intersection(record) => Some(record),
            Self::Address(_) => None,
        }
    }
}

impl fmt::Display for ParsedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(record) => record.fmt(f),
            Self::Intersection(record) => record.fmt(f),
        }
    }
}

fn corner_line(
    prefix: Option<&str>,
    street: &str,
    street_type: Option<&str>,
    suffix: Option<&str>,
) -> String {
    [prefix, Some(street), street_type, suffix]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

fn check_present(field: &'static str, value: Option<&str>) -> Result<(), RecordError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(RecordError::EmptyField(field)),
        _ => Ok(()),
    }
}

fn check_state(state: Option<&str>) -> Result<(), RecordError> {
    match state {
        Some(s) if s.len() != 2 || !s.chars().all(|c| c.is_ascii_uppercase()) => {
            Err(RecordError::InvalidState(s.to_string()))
        }
        _ => Ok(()),
    }
}

fn check_postal_code(postal_code: Option<&str>, ext: Option<&str>) -> Result<(), RecordError> {
    if let Some(code) = postal_code
        && !is_digits(code, 5)
    {
        return Err(RecordError::InvalidPostalCode(code.to_string()));
    }
    match (postal_code, ext) {
        (None, Some(_)) => Err(RecordError::ExtWithoutPostalCode),
        (_, Some(ext)) if !is_digits(ext, 4) => {
            Err(RecordError::InvalidPostalCodeExt(ext.to_string()))
        }
        _ => Ok(()),
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn full_postal_code(postal_code: Option<&str>, ext: Option<&str>) -> Option<String> {
    match (postal_code, ext) {
        (Some(code), Some(ext)) => Some(format!("{code}-{ext}")),
        (Some(code), None) => Some(code.to_string()),
        _ => None,
    }
}

fn place_line(city: Option<&str>, state: Option<&str>, postal: Option<&str>) -> String {
    let mut line = String::new();
    if let Some(city) = city {
        line.push_str(city);
    }
    if let Some(state) = state {
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str(state);
    }
    if let Some(postal) = postal {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(postal);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wacker() -> AddressParts {
        AddressParts {
            number: Some("233".to_string()),
            prefix: Some("S".to_string()),
            street: "Wacker".to_string(),
            street_type: Some("Dr".to_string()),
            postal_code: Some("60606".to_string()),
            postal_code_ext: Some("6306".to_string()),
            ..AddressParts::default()
        }
    }

    #[test]
    fn builds_valid_record() {
        let record = AddressRecord::try_from(wacker()).unwrap();
        assert_eq!(record.number(), Some("233"));
        assert_eq!(record.street(), "Wacker");
        assert_eq!(record.city(), None);
        assert_eq!(record.full_postal_code().as_deref(), Some("60606-6306"));
    }

    #[test]
    fn rejects_empty_street() {
        let parts = AddressParts {
            street: "  ".to_string(),
            ..wacker()
        };
        assert_eq!(AddressRecord::try_from(parts), Err(RecordError::EmptyStreet));
    }

    #[test]
    fn rejects_ext_without_postal_code() {
        let parts = AddressParts {
            postal_code: None,
            ..wacker()
        };
        assert_eq!(
            AddressRecord::try_from(parts),
            Err(RecordError::ExtWithoutPostalCode)
        );
    }

    #[test]
    fn rejects_short_postal_code() {
        let parts = AddressParts {
            postal_code: Some("6060".to_string()),
            ..wacker()
        };
        assert_eq!(
            AddressRecord::try_from(parts),
            Err(RecordError::InvalidPostalCode("6060".to_string()))
        );
    }

    #[test]
    fn rejects_bad_state() {
        let parts = AddressParts {
            state: Some("Cal".to_string()),
            ..wacker()
        };
        assert_eq!(
            AddressRecord::try_from(parts),
            Err(RecordError::InvalidState("Cal".to_string()))
        );
    }

    #[test]
    fn rejects_unmarked_unit() {
        let parts = AddressParts {
            unit: Some("4".to_string()),
            ..wacker()
        };
        assert_eq!(
            AddressRecord::try_from(parts),
            Err(RecordError::UnmarkedUnit("4".to_string()))
        );

        let parts = AddressParts {
            unit: Some("4".to_string()),
            implicit_unit: true,
            ..wacker()
        };
        assert!(AddressRecord::try_from(parts).is_ok());
    }

    #[test]
    fn rejects_empty_optional_field() {
        let parts = AddressParts {
            city: Some(String::new()),
            ..wacker()
        };
        assert_eq!(
            AddressRecord::try_from(parts),
            Err(RecordError::EmptyField("city"))
        );
    }

    #[test]
    fn renders_mailing_line() {
        let parts = AddressParts {
            unit_prefix: Some("#".to_string()),
            unit: Some("42".to_string()),
            city: Some("Chicago".to_string()),
            state: Some("IL".to_string()),
            ..wacker()
        };
        let record = AddressRecord::try_from(parts).unwrap();
        assert_eq!(record.line1(), "233 S Wacker Dr #42");
        assert_eq!(record.line2(), "Chicago, IL 60606-6306");
        assert_eq!(
            record.to_string(),
            "233 S Wacker Dr #42, Chicago, IL 60606-6306"
        );
    }

    #[test]
    fn intersection_requires_both_streets() {
        let parts = IntersectionParts {
            street: "Mission".to_string(),
            ..IntersectionParts::default()
        };
        assert_eq!(
            IntersectionRecord::try_from(parts),
            Err(RecordError::EmptyStreet)
        );
    }

    #[test]
    fn renders_intersection() {
        let parts = IntersectionParts {
            street: "Mission".to_string(),
            street_type: Some("St".to_string()),
            street2: "Valencia".to_string(),
            street_type2: Some("St".to_string()),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            ..IntersectionParts::default()
        };
        let record = IntersectionRecord::try_from(parts).unwrap();
        assert_eq!(
            record.to_string(),
            "Mission St & Valencia St, San Francisco, CA"
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let record = AddressRecord::try_from(wacker()).unwrap();
        let json = serde_json::to_value(ParsedLocation::Address(record)).unwrap();
        assert_eq!(json["kind"], "address");
        assert_eq!(json["street"], "Wacker");
        assert_eq!(json["city"], serde_json::Value::Null);
    }

    #[test]
    fn options_reject_unknown_keys() {
        let err = serde_json::from_str::<ParseOptions>(r#"{"informl": true}"#);
        assert!(err.is_err());

        let options: ParseOptions = serde_json::from_str(r#"{"informal": true}"#).unwrap();
        assert!(options.informal);
        assert!(!options.avoid_redundant_street_type);
    }
}
