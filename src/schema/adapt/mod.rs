//! Adapters from untyped source values to canonical record values.

pub mod conversions;
pub mod coordinates;
pub mod date_utils;
pub mod types;

// Re-export the main types and functions for easier access
pub use conversions::{
    clean_address, clean_string, clean_value, coerce_count, coerce_number, format_telephone, parse_flag,
    parse_no_fee, parse_quintile, parse_sector, value_to_string,
};
pub use coordinates::{BoundingBox, Coordinate, SOUTH_AFRICA, normalize_coordinates};
pub use date_utils::{detect_date_format, normalize_registration_date, parse_date_string};
pub use types::DateFormatConfig;
