#![allow(clippy::too_many_lines)]
//! Normalization tables for street types, directionals, secondary unit
//! designators and states.
//!
//! Every table maps a normalized key (uppercased, periods stripped) to a
//! canonical form. The canonical form is itself a key, so normalizing an
//! already-canonical token returns it unchanged. Adding a spelling
//! variant only requires an entry here.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Selects one of the normalization tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum TableKind {
    /// Street types (`Avenue` → `Ave`).
    StreetType,
    /// Compass directionals (`North` → `N`).
    Directional,
    /// Secondary unit designators (`Suite` → `Ste`).
    UnitDesignator,
    /// States and territories (`New York` → `NY`).
    State,
}

/// `(canonical, long form, other spellings)`.
///
/// Source: USPS Publication 28, Appendix C1. Plural spellings are not
/// listed; [`street_type`] collapses a trailing `S` onto the singular.
const STREET_TYPE_ENTRIES: &[(&str, &str, &[&str])] = &[
    ("Aly", "ALLEY", &["ALLEE", "ALLY"]),
    ("Anx", "ANNEX", &["ANEX", "ANNX"]),
    ("Arc", "ARCADE", &[]),
    ("Ave", "AVENUE", &["AV", "AVEN", "AVENU", "AVN", "AVNUE"]),
    ("Byu", "BAYOU", &["BAYOO"]),
    ("Bch", "BEACH", &[]),
    ("Bnd", "BEND", &[]),
    ("Blf", "BLUFF", &["BLUF"]),
    ("Btm", "BOTTOM", &["BOT", "BOTTM"]),
    ("Blvd", "BOULEVARD", &["BOUL", "BOULV", "BLV"]),
    ("Br", "BRANCH", &["BRNCH"]),
    ("Brg", "BRIDGE", &["BRDGE"]),
    ("Brk", "BROOK", &[]),
    ("Bg", "BURG", &[]),
    ("Byp", "BYPASS", &["BYPA", "BYPAS", "BYPS"]),
    ("Cp", "CAMP", &["CMP"]),
    ("Cyn", "CANYON", &["CANYN", "CNYN"]),
    ("Cpe", "CAPE", &[]),
    ("Cswy", "CAUSEWAY", &["CAUSWA"]),
    ("Ctr", "CENTER", &["CEN", "CENT", "CENTR", "CENTRE", "CNTER", "CNTR"]),
    ("Cir", "CIRCLE", &["CIRC", "CIRCL", "CRCL", "CRCLE"]),
    ("Clf", "CLIFF", &[]),
    ("Clb", "CLUB", &[]),
    ("Cmn", "COMMON", &[]),
    ("Cor", "CORNER", &[]),
    ("Crse", "COURSE", &[]),
    ("Ct", "COURT", &[]),
    ("Cv", "COVE", &[]),
    ("Crk", "CREEK", &[]),
    ("Cres", "CRESCENT", &["CRSENT", "CRSNT"]),
    ("Crst", "CREST", &[]),
    ("Xing", "CROSSING", &["CRSSNG"]),
    ("Xrd", "CROSSROAD", &[]),
    ("Curv", "CURVE", &[]),
    ("Dl", "DALE", &[]),
    ("Dm", "DAM", &[]),
    ("Dv", "DIVIDE", &["DIV", "DVD"]),
    ("Dr", "DRIVE", &["DRIV", "DRV"]),
    ("Est", "ESTATE", &[]),
    ("Expy", "EXPRESSWAY", &["EXP", "EXPR", "EXPRESS", "EXPW"]),
    ("Ext", "EXTENSION", &["EXTN", "EXTNSN"]),
    ("Fls", "FALLS", &[]),
    ("Fry", "FERRY", &["FRRY"]),
    ("Fld", "FIELD", &[]),
    ("Flt", "FLAT", &[]),
    ("Frd", "FORD", &[]),
    ("Frst", "FOREST", &[]),
    ("Frg", "FORGE", &["FORG"]),
    ("Frk", "FORK", &[]),
    ("Ft", "FORT", &["FRT"]),
    ("Fwy", "FREEWAY", &["FREEWY", "FRWAY", "FRWY"]),
    ("Gdn", "GARDEN", &["GARDN", "GRDEN", "GRDN"]),
    ("Gtwy", "GATEWAY", &["GATEWY", "GATWAY", "GTWAY"]),
    ("Gln", "GLEN", &[]),
    ("Grn", "GREEN", &[]),
    ("Grv", "GROVE", &["GROV"]),
    ("Hbr", "HARBOR", &["HARB", "HARBR", "HRBOR"]),
    ("Hvn", "HAVEN", &[]),
    ("Hts", "HEIGHTS", &["HT"]),
    ("Hwy", "HIGHWAY", &["HIGHWY", "HIWAY", "HIWY", "HWAY"]),
    ("Hl", "HILL", &[]),
    ("Holw", "HOLLOW", &["HLLW", "HOLWS"]),
    ("Inlt", "INLET", &[]),
    ("Is", "ISLAND", &["ISLND"]),
    ("Isle", "ISLE", &[]),
    ("Jct", "JUNCTION", &["JCTION", "JCTN", "JUNCTN", "JUNCTON"]),
    ("Ky", "KEY", &[]),
    ("Knl", "KNOLL", &["KNOL"]),
    ("Lk", "LAKE", &[]),
    ("Land", "LAND", &[]),
    ("Lndg", "LANDING", &["LNDNG"]),
    ("Ln", "LANE", &[]),
    ("Lgt", "LIGHT", &[]),
    ("Lf", "LOAF", &[]),
    ("Lck", "LOCK", &[]),
    ("Ldg", "LODGE", &["LDGE", "LODG"]),
    ("Loop", "LOOP", &[]),
    ("Mall", "MALL", &[]),
    ("Mnr", "MANOR", &[]),
    ("Mdw", "MEADOW", &[]),
    ("Mews", "MEWS", &[]),
    ("Ml", "MILL", &[]),
    ("Msn", "MISSION", &["MISSN", "MSSN"]),
    ("Mtwy", "MOTORWAY", &[]),
    ("Mt", "MOUNT", &["MNT"]),
    ("Mtn", "MOUNTAIN", &["MNTAIN", "MNTN", "MOUNTIN", "MTIN"]),
    ("Nck", "NECK", &[]),
    ("Orch", "ORCHARD", &["ORCHRD"]),
    ("Oval", "OVAL", &["OVL"]),
    ("Opas", "OVERPASS", &[]),
    ("Park", "PARK", &["PRK"]),
    ("Pkwy", "PARKWAY", &["PARKWY", "PKWAY", "PKY"]),
    ("Pass", "PASS", &[]),
    ("Psge", "PASSAGE", &[]),
    ("Path", "PATH", &[]),
    ("Pike", "PIKE", &[]),
    ("Pne", "PINE", &[]),
    ("Pl", "PLACE", &[]),
    ("Pln", "PLAIN", &[]),
    ("Plz", "PLAZA", &["PLZA"]),
    ("Pt", "POINT", &[]),
    ("Prt", "PORT", &[]),
    ("Pr", "PRAIRIE", &["PRR"]),
    ("Radl", "RADIAL", &["RAD", "RADIEL"]),
    ("Ramp", "RAMP", &[]),
    ("Rnch", "RANCH", &[]),
    ("Rpd", "RAPID", &[]),
    ("Rst", "REST", &[]),
    ("Rdg", "RIDGE", &["RDGE"]),
    ("Riv", "RIVER", &["RIVR", "RVR"]),
    ("Rd", "ROAD", &[]),
    ("Rte", "ROUTE", &[]),
    ("Row", "ROW", &[]),
    ("Rue", "RUE", &[]),
    ("Run", "RUN", &[]),
    ("Shl", "SHOAL", &[]),
    ("Shr", "SHORE", &["SHOAR"]),
    ("Skwy", "SKYWAY", &[]),
    ("Spg", "SPRING", &["SPNG", "SPRNG"]),
    ("Spur", "SPUR", &[]),
    ("Sq", "SQUARE", &["SQR", "SQRE", "SQU"]),
    ("Sta", "STATION", &["STATN", "STN"]),
    ("Stra", "STRAVENUE", &["STRAV", "STRAVN", "STRVN", "STRVNUE"]),
    ("Strm", "STREAM", &["STREME"]),
    ("St", "STREET", &["STR", "STRT"]),
    ("Smt", "SUMMIT", &["SUMIT", "SUMITT"]),
    ("Ter", "TERRACE", &["TERR"]),
    ("Trwy", "THROUGHWAY", &[]),
    ("Trce", "TRACE", &[]),
    ("Trak", "TRACK", &["TRK"]),
    ("Trfy", "TRAFFICWAY", &[]),
    ("Trl", "TRAIL", &[]),
    ("Tunl", "TUNNEL", &["TUNEL", "TUNNL"]),
    ("Tpke", "TURNPIKE", &["TRNPK", "TURNPK"]),
    ("Upas", "UNDERPASS", &[]),
    ("Un", "UNION", &[]),
    ("Vly", "VALLEY", &["VALLY", "VLLY"]),
    ("Via", "VIADUCT", &["VDCT", "VIADCT"]),
    ("Vw", "VIEW", &[]),
    ("Vlg", "VILLAGE", &["VILL", "VILLAG", "VILLG"]),
    ("Vl", "VILLE", &[]),
    ("Vis", "VISTA", &["VIST", "VST", "VSTA"]),
    ("Walk", "WALK", &[]),
    ("Wall", "WALL", &[]),
    ("Way", "WAY", &[]),
    ("Wl", "WELL", &[]),
];

/// `(canonical, long form)`.
const DIRECTIONAL_ENTRIES: &[(&str, &str)] = &[
    ("N", "NORTH"),
    ("S", "SOUTH"),
    ("E", "EAST"),
    ("W", "WEST"),
    ("NE", "NORTHEAST"),
    ("NW", "NORTHWEST"),
    ("SE", "SOUTHEAST"),
    ("SW", "SOUTHWEST"),
];

/// `(canonical, long form, other spellings, takes an identifier)`.
const UNIT_DESIGNATOR_ENTRIES: &[(&str, &str, &[&str], bool)] = &[
    ("#", "#", &[], true),
    ("Apt", "APARTMENT", &[], true),
    ("Bldg", "BUILDING", &["BLD"], true),
    ("Dept", "DEPARTMENT", &[], true),
    ("Fl", "FLOOR", &["FLR"], true),
    ("Hngr", "HANGAR", &[], true),
    ("Lot", "LOT", &["LT"], true),
    ("Pier", "PIER", &[], true),
    ("Rm", "ROOM", &[], true),
    ("Slip", "SLIP", &[], true),
    ("Spc", "SPACE", &[], true),
    ("Stop", "STOP", &[], true),
    ("Ste", "SUITE", &[], true),
    ("Trlr", "TRAILER", &[], true),
    ("Unit", "UNIT", &[], true),
    ("Bsmt", "BASEMENT", &[], false),
    ("Frnt", "FRONT", &[], false),
    ("Lbby", "LOBBY", &[], false),
    ("Lowr", "LOWER", &[], false),
    ("Ofc", "OFFICE", &[], false),
    ("Ph", "PENTHOUSE", &[], false),
    ("Rear", "REAR", &[], false),
    ("Side", "SIDE", &[], false),
    ("Uppr", "UPPER", &[], false),
];

/// `(code, name)` for the states, the District of Columbia and the
/// inhabited territories.
const STATE_ENTRIES: &[(&str, &str)] = &[
    ("AL", "ALABAMA"),
    ("AK", "ALASKA"),
    ("AS", "AMERICAN SAMOA"),
    ("AZ", "ARIZONA"),
    ("AR", "ARKANSAS"),
    ("CA", "CALIFORNIA"),
    ("CO", "COLORADO"),
    ("CT", "CONNECTICUT"),
    ("DE", "DELAWARE"),
    ("DC", "DISTRICT OF COLUMBIA"),
    ("FM", "FEDERATED STATES OF MICRONESIA"),
    ("FL", "FLORIDA"),
    ("GA", "GEORGIA"),
    ("GU", "GUAM"),
    ("HI", "HAWAII"),
    ("ID", "IDAHO"),
    ("IL", "ILLINOIS"),
    ("IN", "INDIANA"),
    ("IA", "IOWA"),
    ("KS", "KANSAS"),
    ("KY", "KENTUCKY"),
    ("LA", "LOUISIANA"),
    ("ME", "MAINE"),
    ("MH", "MARSHALL ISLANDS"),
    ("MD", "MARYLAND"),
    ("MA", "MASSACHUSETTS"),
    ("MI", "MICHIGAN"),
    ("MN", "MINNESOTA"),
    ("MS", "MISSISSIPPI"),
    ("MO", "MISSOURI"),
    ("MT", "MONTANA"),
    ("NE", "NEBRASKA"),
    ("NV", "NEVADA"),
    ("NH", "NEW HAMPSHIRE"),
    ("NJ", "NEW JERSEY"),
    ("NM", "NEW MEXICO"),
    ("NY", "NEW YORK"),
    ("NC", "NORTH CAROLINA"),
    ("ND", "NORTH DAKOTA"),
    ("MP", "NORTHERN MARIANA ISLANDS"),
    ("OH", "OHIO"),
    ("OK", "OKLAHOMA"),
    ("OR", "OREGON"),
    ("PW", "PALAU"),
    ("PA", "PENNSYLVANIA"),
    ("PR", "PUERTO RICO"),
    ("RI", "RHODE ISLAND"),
    ("SC", "SOUTH CAROLINA"),
    ("SD", "SOUTH DAKOTA"),
    ("TN", "TENNESSEE"),
    ("TX", "TEXAS"),
    ("UT", "UTAH"),
    ("VT", "VERMONT"),
    ("VI", "VIRGIN ISLANDS"),
    ("VA", "VIRGINIA"),
    ("WA", "WASHINGTON"),
    ("WV", "WEST VIRGINIA"),
    ("WI", "WISCONSIN"),
    ("WY", "WYOMING"),
];

/// Spelled ordinals that are rendered numerically inside street names.
const ORDINAL_ENTRIES: &[(&str, &str)] = &[
    ("FIRST", "1st"),
    ("SECOND", "2nd"),
    ("THIRD", "3rd"),
    ("FOURTH", "4th"),
    ("FIFTH", "5th"),
    ("SIXTH", "6th"),
    ("SEVENTH", "7th"),
    ("EIGHTH", "8th"),
    ("NINTH", "9th"),
    ("TENTH", "10th"),
    ("ELEVENTH", "11th"),
    ("TWELFTH", "12th"),
    ("THIRTEENTH", "13th"),
    ("FOURTEENTH", "14th"),
    ("FIFTEENTH", "15th"),
    ("SIXTEENTH", "16th"),
    ("SEVENTEENTH", "17th"),
    ("EIGHTEENTH", "18th"),
    ("NINETEENTH", "19th"),
    ("TWENTIETH", "20th"),
];

/// A street type table hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreetTypeMatch {
    /// Canonical abbreviation (`Rd`).
    pub canonical: &'static str,
    /// The token was the long form (`ROAD`, `ROADS`), not an abbreviation.
    pub spelled_out: bool,
    /// The token was a plural spelling (`STS`, `STREETS`).
    pub plural: bool,
}

/// A secondary unit designator table hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDesignator {
    /// Canonical designator (`Ste`, `Lbby`, `#`).
    pub canonical: &'static str,
    /// Whether the designator is followed by an identifier.
    pub numbered: bool,
}

struct StreetTypeInfo {
    canonical: &'static str,
    long: &'static str,
}

static STREET_TYPES: LazyLock<BTreeMap<String, StreetTypeInfo>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    for &(canonical, long, variants) in STREET_TYPE_ENTRIES {
        let keys = [canonical.to_ascii_uppercase(), long.to_string()]
            .into_iter()
            .chain(variants.iter().map(|v| (*v).to_string()));
        for key in keys {
            map.insert(key, StreetTypeInfo { canonical, long });
        }
    }
    map
});

static DIRECTIONALS: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    DIRECTIONAL_ENTRIES
        .iter()
        .flat_map(|&(canonical, long)| [(canonical, canonical), (long, canonical)])
        .collect()
});

static UNIT_DESIGNATORS: LazyLock<BTreeMap<String, UnitDesignator>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    for &(canonical, long, variants, numbered) in UNIT_DESIGNATOR_ENTRIES {
        let designator = UnitDesignator {
            canonical,
            numbered,
        };
        let keys = [canonical.to_ascii_uppercase(), long.to_string()]
            .into_iter()
            .chain(variants.iter().map(|v| (*v).to_string()));
        for key in keys {
            map.insert(key, designator);
        }
    }
    map
});

static STATES: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    STATE_ENTRIES
        .iter()
        .flat_map(|&(code, name)| [(code, code), (name, code)])
        .collect()
});

static ORDINALS: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| ORDINAL_ENTRIES.iter().copied().collect());

/// Normalizes a token into a table key: uppercased, periods removed,
/// inner whitespace collapsed.
#[must_use]
pub fn normalize_key(token: &str) -> String {
    token
        .split_whitespace()
        .map(|word| word.replace('.', "").to_uppercase())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looks a token up in the street type table.
///
/// A plural spelling that is not itself an entry collapses onto its
/// singular (`STREETS` → `STREET`, `STS` → `ST`).
#[must_use]
pub fn street_type(token: &str) -> Option<StreetTypeMatch> {
    let key = normalize_key(token);
    if let Some(info) = STREET_TYPES.get(&key) {
        return Some(StreetTypeMatch {
            canonical: info.canonical,
            spelled_out: key == info.long,
            plural: false,
        });
    }

    let singular = key.strip_suffix('S')?;
    STREET_TYPES.get(singular).map(|info| StreetTypeMatch {
        canonical: info.canonical,
        spelled_out: singular == info.long,
        plural: true,
    })
}

/// Looks a token up in the directional table, returning `N`, `SE`, ...
#[must_use]
pub fn directional(token: &str) -> Option<&'static str> {
    DIRECTIONALS.get(normalize_key(token).as_str()).copied()
}

/// Returns the title-cased long form of a canonical directional
/// (`E` → `East`).
#[must_use]
pub fn directional_long_form(canonical: &str) -> Option<String> {
    DIRECTIONAL_ENTRIES
        .iter()
        .find(|(abbr, _)| *abbr == canonical)
        .map(|(_, long)| title_case_word(long))
}

/// Looks a token up in the secondary unit designator table.
#[must_use]
pub fn unit_designator(token: &str) -> Option<UnitDesignator> {
    UNIT_DESIGNATORS.get(&normalize_key(token)).copied()
}

/// Looks a state code or name up, returning the two-letter code.
#[must_use]
pub fn state(token: &str) -> Option<&'static str> {
    STATES.get(normalize_key(token).as_str()).copied()
}

/// Returns the numeric form of a spelled ordinal (`First` → `1st`).
#[must_use]
pub fn ordinal(token: &str) -> Option<&'static str> {
    ORDINALS.get(normalize_key(token).as_str()).copied()
}

/// Normalizes a token against one table, returning its canonical form.
#[must_use]
pub fn normalize(kind: TableKind, token: &str) -> Option<&'static str> {
    match kind {
        TableKind::StreetType => street_type(token).map(|m| m.canonical),
        TableKind::Directional => directional(token),
        TableKind::UnitDesignator => unit_designator(token).map(|d| d.canonical),
        TableKind::State => state(token),
    }
}

/// Every canonical value in a table.
#[must_use]
pub fn canonical_values(kind: TableKind) -> Vec<&'static str> {
    match kind {
        TableKind::StreetType => STREET_TYPE_ENTRIES.iter().map(|e| e.0).collect(),
        TableKind::Directional => DIRECTIONAL_ENTRIES.iter().map(|e| e.0).collect(),
        TableKind::UnitDesignator => UNIT_DESIGNATOR_ENTRIES.iter().map(|e| e.0).collect(),
        TableKind::State => STATE_ENTRIES.iter().map(|e| e.0).collect(),
    }
}

/// Title-cases one word: first letter upper, the rest lower. Words that
/// start with a digit are returned verbatim.
#[must_use]
pub fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) if first.is_ascii_digit() => word.to_string(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}
