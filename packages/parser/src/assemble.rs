//! Builds immutable records from resolved parts.
//!
//! A failed invariant check is not surfaced to the caller: it is logged
//! and treated as a non-match, so the next grammar gets its turn.

use street_sweeper_models::{
    AddressParts, AddressRecord, IntersectionParts, IntersectionRecord, ParseOptions,
    ParsedLocation,
};

use crate::engine::RawMatch;
use crate::resolve;

#[must_use]
pub fn address(parts: AddressParts) -> Option<AddressRecord> {
    AddressRecord::try_from(parts)
        .inspect_err(|e| log::debug!("discarding address: {e}"))
        .ok()
}

#[must_use]
pub fn intersection(parts: IntersectionParts) -> Option<IntersectionRecord> {
    IntersectionRecord::try_from(parts)
        .inspect_err(|e| log::debug!("discarding intersection: {e}"))
        .ok()
}

/// Resolves and assembles one grammar match.
#[must_use]
pub fn assemble(raw: &RawMatch<'_>, options: &ParseOptions) -> Option<ParsedLocation> {
    match raw {
        RawMatch::Address(raw) => {
            address(resolve::address(raw, options)).map(ParsedLocation::Address)
        }
        RawMatch::Intersection(raw) => {
            intersection(resolve::intersection(raw, options)).map(ParsedLocation::Intersection)
        }
    }
}
