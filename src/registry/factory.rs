//! The fixed table of regional sources and lookup by name.

use super::SourceConfig;
use crate::error::{IngestError, Result};
use crate::models::Region;

/// File name for each source, in load order
const SOURCE_FILES: [(Region, &str); 10] = [
    (Region::EasternCape, "Eastern_Cape.json"),
    (Region::WesternCape, "Western_Cape.json"),
    (Region::Gauteng, "Gauteng.json"),
    (Region::KwaZuluNatal, "KwaZulu_Natal.json"),
    (Region::Limpopo, "Limpopo.json"),
    (Region::Mpumalanga, "Mpumalanga.json"),
    (Region::NorthernCape, "Northern_Cape.json"),
    (Region::NorthWest, "North_West.json"),
    (Region::FreeState, "Free_State.json"),
    (Region::SpecialNeeds, "Special_Needs.json"),
];

/// All configured sources, in the order their records take precedence
#[must_use]
pub fn default_sources() -> Vec<SourceConfig> {
    SOURCE_FILES
        .iter()
        .map(|(region, file)| SourceConfig::new(*region, *file))
        .collect()
}

/// Look a source up by region name, file stem or province code (case-insensitive)
pub fn source_from_name(name: &str) -> Result<SourceConfig> {
    let wanted = name.trim().to_lowercase();
    let stem = wanted.strip_suffix(".json").unwrap_or(&wanted);
    let by_name = Region::from_name(name);

    SOURCE_FILES
        .iter()
        .find(|(region, file)| {
            by_name == Some(*region)
                || file.to_lowercase().strip_suffix(".json") == Some(stem)
                || region.code().is_some_and(|code| code.eq_ignore_ascii_case(&wanted))
        })
        .map(|(region, file)| SourceConfig::new(*region, *file))
        .ok_or_else(|| IngestError::UnknownSource(name.to_string()))
}
