//! Coordinate normalization
//!
//! Sources store positions in degrees, in fixed-point integers scaled by 10^4 or
//! 10^5, with flipped signs, and sometimes with longitude and latitude in each other's
//! column. [`normalize_coordinates`] recovers a pair inside the target bounding box or
//! gives up. The correction is heuristic: a pair near a band edge can come out
//! plausible and wrong, which is accepted since the result is only used for placement
//! on a map.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A longitude/latitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    /// Sentinel for a record whose position could not be recovered
    pub const UNMAPPED: Self = Self {
        longitude: 0.0,
        latitude: 0.0,
    };

    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Whether this is the unmapped sentinel
    #[must_use]
    pub fn is_unmapped(&self) -> bool {
        self.longitude == 0.0 && self.latitude == 0.0
    }
}

/// Inclusive geographic bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (self.min_longitude..=self.max_longitude).contains(&coordinate.longitude)
            && (self.min_latitude..=self.max_latitude).contains(&coordinate.latitude)
    }
}

/// Authoritative bounds for every admitted position
pub const SOUTH_AFRICA: BoundingBox = BoundingBox {
    min_longitude: 15.0,
    max_longitude: 35.0,
    min_latitude: -36.0,
    max_latitude: -20.0,
};

/// Magnitude band of a latitude written into the longitude column
const LATITUDE_MAGNITUDE: (f64, f64) = (22.0, 36.0);
/// Magnitude band of a longitude written into the latitude column
const LONGITUDE_MAGNITUDE: (f64, f64) = (16.0, 35.0);

/// Normalize raw source values into an in-region coordinate
///
/// Returns `None` when either value is missing, non-numeric, zero, outside every
/// known fixed-point scale, or still outside [`SOUTH_AFRICA`] after correction.
#[must_use]
pub fn normalize_coordinates(raw_lon: Option<&Value>, raw_lat: Option<&Value>) -> Option<Coordinate> {
    let lon = coerce_coordinate(raw_lon?)?;
    let lat = coerce_coordinate(raw_lat?)?;
    normalize_degrees(lon, lat)
}

/// Numeric core of [`normalize_coordinates`]
#[must_use]
pub fn normalize_degrees(lon: f64, lat: f64) -> Option<Coordinate> {
    if lon.is_nan() || lat.is_nan() || lon == 0.0 || lat == 0.0 {
        return None;
    }

    let (lon, lat) = unswap_axes(rescale(lon)?, rescale(lat)?);
    let coordinate = fix_hemispheres(lon, lat);

    SOUTH_AFRICA.contains(coordinate).then_some(coordinate)
}

/// Recover degrees from fixed-point encodings
fn rescale(value: f64) -> Option<f64> {
    let magnitude = value.abs();
    if magnitude < 100.0 {
        Some(value)
    } else if (100_000.0..1_000_000.0).contains(&magnitude) {
        Some(value / 10_000.0)
    } else if (1_000_000.0..10_000_000.0).contains(&magnitude) {
        Some(value / 100_000.0)
    } else {
        None
    }
}

/// Swap when a negative latitude-sized value sits in the longitude column and a
/// positive longitude-sized value sits in the latitude column
fn unswap_axes(lon: f64, lat: f64) -> (f64, f64) {
    let lon_looks_like_lat = (LATITUDE_MAGNITUDE.0..=LATITUDE_MAGNITUDE.1).contains(&lon.abs());
    let lat_looks_like_lon = (LONGITUDE_MAGNITUDE.0..=LONGITUDE_MAGNITUDE.1).contains(&lat.abs());

    if lon < 0.0 && lon_looks_like_lat && lat > 0.0 && lat_looks_like_lon {
        (lat, lon)
    } else {
        (lon, lat)
    }
}

/// Southern latitudes and eastern longitudes only
fn fix_hemispheres(mut lon: f64, mut lat: f64) -> Coordinate {
    if lat > 20.0 && lat < 36.0 {
        lat = -lat;
    }
    if lon < 0.0 && lon.abs() > 15.0 && lon.abs() < 35.0 {
        lon = lon.abs();
    }
    Coordinate::new(lon, lat)
}

fn coerce_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Parse the longest numeric prefix of a string, ignoring trailing garbage
/// such as a degree sign or unit suffix
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = digits_from(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits_from(end + 1);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    // Exponent only counts when it has at least one digit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_digits = digits_from(end + 1 + sign);
        if exponent_digits > 0 {
            end += 1 + sign + exponent_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}
