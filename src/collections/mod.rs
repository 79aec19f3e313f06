//! School collections
//!
//! Identity-based deduplication of the combined multi-source collection.

use rustc_hash::FxHashSet;

use crate::models::School;

/// Remove schools whose id was already seen, keeping the first occurrence
///
/// The survivors keep their relative order, so callers control precedence by the
/// order in which they concatenate sources. Applying this twice is the same as
/// applying it once.
#[must_use]
pub fn deduplicate(schools: Vec<School>) -> Vec<School> {
    let mut seen = FxHashSet::default();
    seen.reserve(schools.len());

    schools
        .into_iter()
        .filter(|school| seen.insert(school.id.clone()))
        .collect()
}
