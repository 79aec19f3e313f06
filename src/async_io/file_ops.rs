//! Async operations for reading regional JSON files
//! Resolves each source's file inside a data directory and decodes it

use std::path::{Path, PathBuf};
use std::time::Instant;

use tokio::fs;

use crate::error::Result;
use crate::registry::{FetchFuture, RecordSource, SourceConfig, decode_records};
use crate::schema::RawRecord;
use crate::utils::{log_operation_complete, log_operation_start, log_warning};

/// Supplier reading `<base_dir>/<source file>` for every source
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    base_dir: PathBuf,
}

impl JsonDirSource {
    /// Supplier rooted at `base_dir`
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory the source files are resolved against
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file backing `source`
    #[must_use]
    pub fn path_for(&self, source: &SourceConfig) -> PathBuf {
        self.base_dir.join(&source.file)
    }
}

impl RecordSource for JsonDirSource {
    fn describe(&self) -> String {
        format!("JSON files in {}", self.base_dir.display())
    }

    fn fetch<'a>(&'a self, source: &'a SourceConfig) -> FetchFuture<'a> {
        Box::pin(async move {
            let path = self.path_for(source);
            read_records_async(&path, &source.name).await
        })
    }
}

/// Read and decode one JSON file of raw records
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid JSON, or does not hold
/// a JSON array
pub async fn read_records_async(path: &Path, source_name: &str) -> Result<Vec<RawRecord>> {
    log_operation_start("Reading school records from", path);
    let start = Instant::now();

    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log_warning(&format!("Failed to read {source_name}: {e}"), Some(path));
            return Err(e.into());
        }
    };

    let records = decode_records(&bytes, source_name)?;
    log_operation_complete("read", path, records.len(), Some(start.elapsed()));

    Ok(records)
}
