//! Regional school sources
//!
//! Each source is one regional dataset with its own column spellings and encoding
//! quirks, declared by a [`SourceConfig`] that names its file and the region its
//! records default to. Retrieval is abstracted behind [`RecordSource`]; this module
//! and its children only care about turning what a source yields into [`School`]s.
//!
//! Available sources (see [`factory::default_sources`]):
//! - the nine provincial datasets (Eastern Cape through Free State)
//! - the national special needs education centres dataset
//!
//! [`School`]: crate::models::School

pub mod classify;
pub mod conversion;
pub mod factory;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::{IngestError, Result};
use crate::models::Region;
use crate::schema::RawRecord;

pub use conversion::{ParseOptions, Rejection, from_raw_record, parse_batch, parse_schools};
pub use factory::{default_sources, source_from_name};

/// One configured regional source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Display name used in progress and logs
    pub name: String,
    /// File name (or other handle) the supplier resolves
    pub file: String,
    /// Region assigned to records that do not say otherwise
    pub region: Region,
}

impl SourceConfig {
    /// Source named after its default region
    #[must_use]
    pub fn new(region: Region, file: impl Into<String>) -> Self {
        Self {
            name: region.name().to_string(),
            file: file.into(),
            region,
        }
    }

    /// Override the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Boxed future returned by [`RecordSource::fetch`]
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<RawRecord>>> + Send + 'a>>;

/// Supplier of decoded raw records for a source
///
/// Transport is up to the implementation. A fetch resolves to the source's records
/// or to an error; the loader turns errors into an empty contribution.
pub trait RecordSource: Send + Sync {
    /// Short description of the supplier for logs
    fn describe(&self) -> String;

    /// Retrieve and decode the records of one source
    fn fetch<'a>(&'a self, source: &'a SourceConfig) -> FetchFuture<'a>;
}

/// Decode a JSON payload that must be an array of flat objects
///
/// Elements that are not objects are kept as empty records so they count as raw
/// input and are rejected during assembly.
pub fn decode_records(bytes: &[u8], source_name: &str) -> Result<Vec<RawRecord>> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(items) => Ok(items.into_iter().map(conversion::into_raw_record).collect()),
        other => Err(IngestError::InvalidPayload(format!(
            "{source_name}: expected a JSON array, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
