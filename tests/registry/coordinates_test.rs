use school_ingest::schema::adapt::SOUTH_AFRICA;
use school_ingest::{Coordinate, normalize_coordinates};
use serde_json::{Value, json};

fn normalize(lon: Value, lat: Value) -> Option<Coordinate> {
    normalize_coordinates(Some(&lon), Some(&lat))
}

/// Already valid positions pass through unchanged
#[test]
fn test_valid_positions_unchanged() {
    for (lon, lat) in [(18.4241, -33.9249), (31.0218, -29.8587), (15.0, -36.0), (35.0, -20.0)] {
        assert_eq!(normalize(json!(lon), json!(lat)), Some(Coordinate::new(lon, lat)));
    }
}

/// Scaled and axis-swapped input is recovered
#[test]
fn test_scaled_swapped_recovered() {
    let coordinate = normalize(json!(-2907075), json!(2619800)).expect("should recover");
    assert!((coordinate.longitude - 26.198).abs() < 1e-9);
    assert!((coordinate.latitude + 29.07075).abs() < 1e-9);
}

/// Unrecoverable input is rejected rather than guessed
#[test]
fn test_unrecoverable_rejected() {
    assert_eq!(normalize(json!(0), json!(-26.0)), None);
    assert_eq!(normalize(json!("n/a"), json!(-26.0)), None);
    assert_eq!(normalize(json!(-0.1278), json!(51.5074)), None);
    assert_eq!(normalize_coordinates(None, Some(&json!(-26.0))), None);
}

/// Whatever comes out lies inside the bounding box
#[test]
fn test_output_always_in_bounds() {
    let inputs = [
        (json!(28.1), json!(26.2)),
        (json!(-28.1), json!(-26.2)),
        (json!("28.05abc"), json!("-26.2")),
        (json!(2805000), json!(-262000)),
        (json!(-287158), json!(287158)),
        (json!(1e9), json!(1e9)),
    ];

    for (lon, lat) in inputs {
        if let Some(coordinate) = normalize(lon, lat) {
            assert!(SOUTH_AFRICA.contains(coordinate), "{coordinate:?} out of bounds");
        }
    }
}
