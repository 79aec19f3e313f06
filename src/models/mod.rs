//! Domain models
//!
//! The normalized [`School`] record and the closed enumerations it uses.

pub mod school;
pub mod types;

pub use school::{School, schools_in_region, to_geojson};
pub use types::{Region, Sector};

/// Prefix of ids synthesized for records that carry a name but no identity
pub const SYNTHETIC_ID_PREFIX: &str = "unknown-";

/// Literal name for records whose name could not be resolved
pub const PLACEHOLDER_NAME: &str = "Unknown School";
