use std::path::Path;
use std::sync::Arc;

use school_ingest::{IngestConfig, MemorySource, RawRecord, Region, SchoolLoader, SourceConfig};
use serde_json::{Value, json};

/// Convert a JSON object literal into a raw record
#[must_use]
pub fn raw(value: Value) -> RawRecord {
    value.as_object().cloned().unwrap_or_default()
}

/// A complete, valid record as one of the provincial sources would deliver it
#[must_use]
pub fn school_record(id: &str, name: &str) -> RawRecord {
    raw(json!({
        "NatEmis": id,
        "Official_Institution_Name": name,
        "GIS_Longitude": 28.0473,
        "GIS_Latitude": -26.2041,
        "Sector": "PUBLIC",
        "Phase_PED": "PRIMARY SCHOOL",
        "Learners2024": 812,
        "Educators2024": 27,
        "Quintile": 3,
        "NoFeeSchool": "YES",
        "Status": "OPEN"
    }))
}

/// Two-source configuration: Gauteng first, then Limpopo
#[must_use]
pub fn two_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new(Region::Gauteng, "Gauteng.json"),
        SourceConfig::new(Region::Limpopo, "Limpopo.json"),
    ]
}

/// Loader over an in-memory supplier and the given sources
#[must_use]
pub fn memory_loader(supplier: MemorySource, sources: Vec<SourceConfig>) -> SchoolLoader {
    SchoolLoader::new(Arc::new(supplier), &IngestConfig::default()).with_sources(sources)
}

/// Write `contents` to `dir/name`
pub fn write_source(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("failed to write source fixture");
}
