//! Normalized school record
//!
//! A [`School`] is assembled once from a raw source record and never mutated
//! afterwards. Optional attributes are `None` rather than holding a placeholder, and
//! designation flags are only serialized when set.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::types::{Region, Sector};
use crate::schema::adapt::Coordinate;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Canonical school record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    /// Stable identity; synthesized ids start with `unknown-`
    pub id: String,
    pub name: String,
    pub region: Region,
    /// Longitude in degrees, `0` when unmapped
    pub longitude: f64,
    /// Latitude in degrees, `0` when unmapped
    pub latitude: f64,
    pub sector: Sector,
    pub phase: String,
    pub learners: u32,
    pub educators: u32,
    pub district: String,
    pub town: String,
    pub quintile: String,
    pub no_fee_school: bool,
    pub status: String,

    // Extended attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialisation: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub full_service_school: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urban_rural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_municipality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addressee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub township: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ex_dept: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub section21: bool,

    // Administrative attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_land: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_buildings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_centre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodal_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<f64>,
}

impl School {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }

    /// Whether the school has a recovered position and can be plotted
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        !self.coordinate().is_unmapped()
    }

    /// Whether the id was synthesized because the source carried none
    #[must_use]
    pub fn has_synthetic_id(&self) -> bool {
        self.id.starts_with(super::SYNTHETIC_ID_PREFIX)
    }
}

/// Schools attributed to one region, in collection order
#[must_use]
pub fn schools_in_region(schools: &[School], region: Region) -> Vec<&School> {
    schools.iter().filter(|school| school.region == region).collect()
}

/// GeoJSON `FeatureCollection` of point features, one per mapped school, with the
/// school's serialized form as the feature properties
#[must_use]
pub fn to_geojson(schools: &[School]) -> Value {
    let features: Vec<Value> = schools
        .iter()
        .filter(|school| school.is_mapped())
        .map(|school| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [school.longitude, school.latitude],
                },
                "properties": school,
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal school for tests
    pub fn school(id: &str, name: &str) -> School {
        School {
            id: id.to_string(),
            name: name.to_string(),
            region: Region::Gauteng,
            longitude: 28.0473,
            latitude: -26.2041,
            sector: Sector::Public,
            phase: "PRIMARY SCHOOL".to_string(),
            learners: 0,
            educators: 0,
            district: "Unknown".to_string(),
            town: "Unknown".to_string(),
            quintile: "Unknown".to_string(),
            no_fee_school: false,
            status: "OPEN".to_string(),
            school_type: None,
            specialisation: None,
            full_service_school: false,
            circuit: None,
            urban_rural: None,
            municipality: None,
            local_municipality: None,
            ward_id: None,
            addressee: None,
            township: None,
            suburb: None,
            street_address: None,
            postal_address: None,
            telephone: None,
            ex_dept: None,
            section21: false,
            data_year: None,
            owner_land: None,
            owner_buildings: None,
            exam_no: None,
            exam_centre: None,
            sp_code: None,
            sp_name: None,
            nas: None,
            nodal_area: None,
            registration_date: None,
            allocation: None,
        }
    }
}
