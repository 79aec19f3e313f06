//! A Rust library for normalizing heterogeneous regional school datasets into one
//! clean, deduplicated, geospatially valid collection.
//!
//! Each regional source spells its columns differently and carries its own encoding
//! defects (scaled, swapped, or sign-flipped coordinates, sentinel values,
//! placeholder strings). The pipeline resolves field aliases, corrects coordinates,
//! coerces categorical values, drops closed or unidentifiable records, and merges
//! all sources with first-seen-wins deduplication.

pub mod async_io;
pub mod cache;
pub mod collections;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod registry;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::IngestConfig;
pub use error::{IngestError, Result};
pub use models::{Region, School, Sector, schools_in_region, to_geojson};

// Pipeline stages
pub use collections::deduplicate;
pub use registry::{
    RecordSource, SourceConfig, default_sources, from_raw_record, parse_batch, parse_schools,
    source_from_name,
};
pub use schema::RawRecord;
pub use schema::adapt::{Coordinate, normalize_coordinates};

// Loading and caching
pub use async_io::{JsonDirSource, MemorySource};
pub use cache::{CacheStatus, SchoolCache};
pub use loader::{LoadProgress, LoadSummary, ProgressObserver, SchoolLoad, SchoolLoader, SourceReport};
