//! Raw record to [`School`] conversion
//!
//! [`from_raw_record`] assembles one record; [`parse_batch`] applies it to a whole
//! source batch, keeping assembled records in input order and dropping rejects.

use std::fmt;

use rand::Rng;
use rayon::prelude::*;
use serde_json::Value;

use super::classify::{classify_region, closed_status};
use crate::config::{DEFAULT_PARALLEL_PARSE_THRESHOLD, IngestConfig};
use crate::models::{PLACEHOLDER_NAME, Region, SYNTHETIC_ID_PREFIX, School};
use crate::schema::adapt::{
    Coordinate, DateFormatConfig, clean_address, clean_value, coerce_count, coerce_number,
    format_telephone, normalize_coordinates, normalize_registration_date, parse_flag,
    parse_no_fee, parse_quintile, parse_sector, value_to_string,
};
use crate::schema::field_mapping::SENTINEL_NUMBER;
use crate::schema::{Field, RawRecord, resolve, resolve_identity};

const DEFAULT_PHASE: &str = "UNKNOWN";
const DEFAULT_LOCALITY: &str = "Unknown";
const DEFAULT_STATUS: &str = "OPEN";

/// Why a record was left out of the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Neither an id nor a name under any known spelling
    Unidentified,
    /// Explicitly closed
    Closed(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unidentified => f.write_str("no identity fields"),
            Self::Closed(status) => write!(f, "status {status}"),
        }
    }
}

/// Options for parsing a source batch
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Formats tried for registration dates
    pub date_format: DateFormatConfig,
    /// Batches at least this long are parsed on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            date_format: DateFormatConfig::default(),
            parallel_threshold: DEFAULT_PARALLEL_PARSE_THRESHOLD,
        }
    }
}

impl From<&IngestConfig> for ParseOptions {
    fn from(config: &IngestConfig) -> Self {
        Self {
            date_format: config.date_format.clone(),
            parallel_threshold: config.parallel_parse_threshold,
        }
    }
}

/// Assemble one raw record into a [`School`]
///
/// Rejects records with no identity under any alias and records with a closed
/// status. Every other anomaly is coerced: unrecoverable coordinates become the
/// unmapped sentinel, placeholders become `None`, unparseable categories their
/// defaults.
pub fn from_raw_record(
    record: &RawRecord,
    default_region: Region,
    options: &ParseOptions,
) -> Result<School, Rejection> {
    let id = resolve_identity(record, Field::Id);
    let name = resolve_identity(record, Field::Name);
    if id.is_none() && name.is_none() {
        return Err(Rejection::Unidentified);
    }

    if let Some(status) = closed_status(record) {
        return Err(Rejection::Closed(status.to_string()));
    }

    let id = id
        .and_then(value_to_string)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(synthesize_id);
    let name = name
        .and_then(value_to_string)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_NAME.to_string());

    let coordinate = normalize_coordinates(
        resolve(record, Field::Longitude),
        resolve(record, Field::Latitude),
    )
    .unwrap_or(Coordinate::UNMAPPED);

    let text = |field: Field| resolve(record, field).and_then(clean_value);

    Ok(School {
        id,
        name,
        region: classify_region(record, default_region),
        longitude: coordinate.longitude,
        latitude: coordinate.latitude,
        sector: parse_sector(resolve(record, Field::Sector)),
        phase: text(Field::Phase).unwrap_or_else(|| DEFAULT_PHASE.to_string()),
        learners: coerce_count(resolve(record, Field::Learners)),
        educators: coerce_count(resolve(record, Field::Educators)),
        district: text(Field::District).unwrap_or_else(|| DEFAULT_LOCALITY.to_string()),
        town: text(Field::Town)
            .or_else(|| text(Field::Suburb))
            .unwrap_or_else(|| DEFAULT_LOCALITY.to_string()),
        quintile: parse_quintile(resolve(record, Field::Quintile)),
        no_fee_school: parse_no_fee(resolve(record, Field::NoFeeSchool)),
        status: text(Field::Status).unwrap_or_else(|| DEFAULT_STATUS.to_string()),

        school_type: text(Field::SchoolType),
        specialisation: text(Field::Specialisation),
        full_service_school: parse_flag(resolve(record, Field::FullServiceSchool)),
        circuit: text(Field::Circuit).filter(|circuit| circuit != "0"),
        urban_rural: text(Field::UrbanRural),
        municipality: text(Field::Municipality),
        local_municipality: text(Field::LocalMunicipality),
        ward_id: text(Field::WardId),
        addressee: text(Field::Addressee),
        township: text(Field::Township),
        suburb: text(Field::Suburb),
        street_address: resolve(record, Field::StreetAddress).and_then(clean_address),
        postal_address: resolve(record, Field::PostalAddress).and_then(clean_address),
        telephone: resolve(record, Field::Telephone).and_then(format_telephone),
        ex_dept: text(Field::ExDept),
        section21: parse_flag(resolve(record, Field::Section21)),

        data_year: resolve(record, Field::DataYear)
            .and_then(coerce_number)
            .filter(|year| *year != 0.0)
            .map(|year| year.round() as i32),
        owner_land: text(Field::OwnerLand),
        owner_buildings: text(Field::OwnerBuildings),
        exam_no: text(Field::ExamNo),
        exam_centre: text(Field::ExamCentre),
        sp_code: text(Field::SpCode),
        sp_name: text(Field::SpName),
        nas: text(Field::Nas),
        nodal_area: text(Field::NodalArea),
        registration_date: resolve(record, Field::RegistrationDate)
            .and_then(|value| normalize_registration_date(value, &options.date_format)),
        allocation: resolve(record, Field::Allocation)
            .and_then(coerce_number)
            .filter(|amount| *amount != 0.0 && *amount != SENTINEL_NUMBER),
    })
}

/// Parse every record of one source batch
///
/// Never fails: rejected records only shorten the output. Output order follows
/// input order, also when the batch is large enough to be parsed in parallel.
#[must_use]
pub fn parse_batch(records: Vec<RawRecord>, default_region: Region, options: &ParseOptions) -> Vec<School> {
    let assemble = |record: RawRecord| match from_raw_record(&record, default_region, options) {
        Ok(school) => Some(school),
        Err(rejection) => {
            log::debug!("{default_region}: dropped record ({rejection})");
            None
        }
    };

    if records.len() >= options.parallel_threshold {
        records.into_par_iter().filter_map(assemble).collect()
    } else {
        records.into_iter().filter_map(assemble).collect()
    }
}

/// [`parse_batch`] with default options
#[must_use]
pub fn parse_schools(records: Vec<RawRecord>, default_region: Region) -> Vec<School> {
    parse_batch(records, default_region, &ParseOptions::default())
}

fn synthesize_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    let suffix: String = (0..9)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect();
    format!("{SYNTHETIC_ID_PREFIX}{suffix}")
}

/// Convert a decoded JSON value into a raw record; non-objects become an empty
/// record, which assembly then rejects
#[must_use]
pub fn into_raw_record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        _ => RawRecord::new(),
    }
}
