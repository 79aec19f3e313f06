//! Record classification: effective region and admission eligibility.

use serde_json::Value;

use crate::models::Region;
use crate::schema::{Field, RawRecord, resolve, resolve_str};

/// Phrases in a school's type that place it in [`Region::SpecialNeeds`]
pub const SPECIAL_NEEDS_MARKERS: [&str; 2] = ["SPECIAL NEEDS", "SPECIAL SCHOOL"];

/// Status values that exclude a school from the collection
pub const CLOSED_STATUSES: [&str; 2] = ["CLOSED", "PERMANENTLY CLOSED"];

/// Raw column carrying a short province code in some sources
pub const PROVINCE_CODE_FIELD: &str = "Province";

/// Whether the record's type marks it as a special needs school
#[must_use]
pub fn is_special_needs(record: &RawRecord) -> bool {
    resolve_str(record, Field::SchoolType).is_some_and(|school_type| {
        let upper = school_type.to_uppercase();
        SPECIAL_NEEDS_MARKERS
            .iter()
            .any(|marker| upper.contains(marker))
    })
}

/// Effective region for a record from a source whose default region is `default_region`
///
/// Special needs sources and special needs schools always map to
/// [`Region::SpecialNeeds`]. Otherwise a recognised province code wins over the
/// source default.
#[must_use]
pub fn classify_region(record: &RawRecord, default_region: Region) -> Region {
    if default_region == Region::SpecialNeeds || is_special_needs(record) {
        return Region::SpecialNeeds;
    }

    record
        .get(PROVINCE_CODE_FIELD)
        .and_then(Value::as_str)
        .and_then(Region::from_code)
        .unwrap_or(default_region)
}

/// Closed status carried by the record, if any
#[must_use]
pub fn closed_status(record: &RawRecord) -> Option<&str> {
    let status = resolve(record, Field::Status)?.as_str()?;
    CLOSED_STATUSES
        .iter()
        .any(|closed| status.eq_ignore_ascii_case(closed))
        .then_some(status)
}
