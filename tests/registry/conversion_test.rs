use crate::utils::{raw, school_record};
use school_ingest::registry::{ParseOptions, Rejection};
use school_ingest::{Region, Sector, from_raw_record, parse_schools};
use serde_json::json;

/// A complete provincial record keeps its values and gets canonical categories
#[test]
fn test_complete_record() {
    let school = from_raw_record(
        &school_record("700110011", "Alpha Primary"),
        Region::Gauteng,
        &ParseOptions::default(),
    )
    .expect("record should be admitted");

    assert_eq!(school.id, "700110011");
    assert_eq!(school.name, "Alpha Primary");
    assert_eq!(school.region, Region::Gauteng);
    assert_eq!(school.sector, Sector::Public);
    assert_eq!(school.quintile, "Q3");
    assert_eq!(school.learners, 812);
    assert!(school.no_fee_school);
    assert!(school.is_mapped());
}

/// Records are admitted on name alone and on id alone
#[test]
fn test_partial_identity() {
    let options = ParseOptions::default();

    let named = from_raw_record(&raw(json!({ "Name": "Beta High" })), Region::Limpopo, &options)
        .expect("name-only record should be admitted");
    assert!(named.has_synthetic_id());
    assert_eq!(named.id.len(), "unknown-".len() + 9);

    let numbered = from_raw_record(&raw(json!({ "NatEMIS": 400123 })), Region::Limpopo, &options)
        .expect("id-only record should be admitted");
    assert_eq!(numbered.id, "400123");
    assert_eq!(numbered.name, "Unknown School");
}

/// Empty identity values do not count as identity
#[test]
fn test_empty_identity_rejected() {
    let result = from_raw_record(
        &raw(json!({ "NatEmis": "", "Name": null, "ID": 0, "Sector": "PUBLIC" })),
        Region::Gauteng,
        &ParseOptions::default(),
    );
    assert_eq!(result.unwrap_err(), Rejection::Unidentified);
}

/// A permanently closed school never leaves the batch parser
#[test]
fn test_closed_status_excluded() {
    let mut closed = school_record("1", "Gamma");
    closed.insert("Status".to_string(), json!("PERMANENTLY CLOSED"));

    let schools = parse_schools(
        vec![closed, school_record("2", "Delta"), raw(json!({ "Status": "OPEN" }))],
        Region::Gauteng,
    );

    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0].id, "2");
}

/// Placeholder values never reach the normalized record
#[test]
fn test_placeholders_removed() {
    let mut record = school_record("3", "Epsilon");
    record.insert("Quintile".to_string(), json!(99));
    record.insert("Suburb".to_string(), json!("UNKNOWN"));
    record.insert("District".to_string(), json!("  "));

    let school = from_raw_record(&record, Region::Gauteng, &ParseOptions::default())
        .expect("record should be admitted");

    assert_eq!(school.quintile, "Unknown");
    assert_eq!(school.suburb, None);
    assert_eq!(school.district, "Unknown");
}

/// Special needs schools are regrouped regardless of their source
#[test]
fn test_special_needs_regrouped() {
    let mut record = school_record("4", "Zeta LSEN");
    record.insert("Type_DoE".to_string(), json!("Special Needs Education Centre"));

    let school = from_raw_record(&record, Region::FreeState, &ParseOptions::default())
        .expect("record should be admitted");
    assert_eq!(school.region, Region::SpecialNeeds);
}
