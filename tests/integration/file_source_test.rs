use crate::utils::write_source;
use school_ingest::utils::NoopObserver;
use school_ingest::{IngestConfig, Region, SchoolLoader, to_geojson};

/// Loading the default sources from a directory tolerates missing, malformed, and
/// non-array files
#[tokio::test]
async fn test_load_from_directory() -> school_ingest::Result<()> {
    let dir = tempfile::tempdir()?;
    write_source(
        dir.path(),
        "Gauteng.json",
        r#"[
            {"NatEmis": "700110011", "Official_Institution_Name": "Alpha Primary",
             "GIS_Longitude": 28.0473, "GIS_Latitude": -26.2041, "Quintile": 5},
            {"NatEmis": "700110012", "Official_Institution_Name": "Beta Secondary",
             "GIS_Longitude": "-2907075", "GIS_Latitude": "2619800"},
            {"NatEmis": "700110013", "Official_Institution_Name": "Gamma",
             "Status": "PERMANENTLY CLOSED"}
        ]"#,
    );
    write_source(dir.path(), "Limpopo.json", "[{\"NatEmis\": ");
    write_source(dir.path(), "Free_State.json", r#"{"schools": []}"#);
    write_source(
        dir.path(),
        "Special_Needs.json",
        r#"[{"NatEMIS": 500100200, "Institution_Name": "Delta LSEN", "Province": "GT"}]"#,
    );

    let config = IngestConfig::default().with_data_dir(dir.path());
    let load = SchoolLoader::from_config(&config).load(&NoopObserver).await;

    assert_eq!(load.summary.sources.len(), 10);
    assert_eq!(load.summary.raw_count, 4);
    assert_eq!(load.summary.final_count, 3);
    // Six files are missing, two are malformed
    assert_eq!(load.summary.failed_sources().count(), 8);

    let beta = load
        .schools
        .iter()
        .find(|s| s.id == "700110012")
        .expect("beta should be loaded");
    assert!((beta.longitude - 26.198).abs() < 1e-9);
    assert!((beta.latitude + 29.07075).abs() < 1e-9);

    let delta = load.schools.last().expect("special needs school");
    assert_eq!(delta.id, "500100200");
    assert_eq!(delta.region, Region::SpecialNeeds);

    let geojson = to_geojson(&load.schools);
    assert_eq!(geojson["type"], "FeatureCollection");
    assert_eq!(geojson["features"].as_array().map(Vec::len), Some(2));

    Ok(())
}

/// An empty directory produces an empty collection rather than an error
#[tokio::test]
async fn test_empty_directory() -> school_ingest::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = IngestConfig::default().with_data_dir(dir.path());

    let load = SchoolLoader::from_config(&config).load(&NoopObserver).await;

    assert!(load.schools.is_empty());
    assert_eq!(load.summary.final_count, 0);
    assert_eq!(load.summary.failed_sources().count(), 10);
    Ok(())
}
