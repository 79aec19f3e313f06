//! Configuration for school ingestion.

use std::path::PathBuf;
use std::time::Duration;

use crate::schema::adapt::types::DateFormatConfig;

/// Default directory holding the regional JSON files
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default bound on a single source retrieval
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Batches at least this large are parsed in parallel
pub const DEFAULT_PARALLEL_PARSE_THRESHOLD: usize = 4096;

/// Configuration for loading and normalizing the regional sources
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Directory containing the per-region JSON files
    pub data_dir: PathBuf,
    /// Upper bound on the time one source retrieval may take
    pub fetch_timeout: Duration,
    /// Maximum number of sources retrieved at the same time
    pub max_concurrent_sources: usize,
    /// Minimum batch length for which parsing is spread over the rayon pool
    pub parallel_parse_threshold: usize,
    /// Date formats tried when normalizing registration dates
    pub date_format: DateFormatConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_concurrent_sources: num_cpus::get().max(1),
            parallel_parse_threshold: DEFAULT_PARALLEL_PARSE_THRESHOLD,
            date_format: DateFormatConfig::default(),
        }
    }
}

impl IngestConfig {
    /// Build a configuration from defaults overridden by environment variables
    ///
    /// Recognised variables: `SCHOOLS_DATA_DIR`, `SCHOOLS_FETCH_TIMEOUT_SECS`,
    /// `SCHOOLS_MAX_CONCURRENCY`. Unparseable values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("SCHOOLS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(secs) = env_number::<u64>("SCHOOLS_FETCH_TIMEOUT_SECS") {
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = env_number::<usize>("SCHOOLS_MAX_CONCURRENCY") {
            config.max_concurrent_sources = limit.max(1);
        }

        config
    }

    /// Set the data directory
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the per-source retrieval bound
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set how many sources may be retrieved at once
    #[must_use]
    pub fn with_max_concurrent_sources(mut self, limit: usize) -> Self {
        self.max_concurrent_sources = limit.max(1);
        self
    }

    /// Set the batch length from which parsing goes parallel
    #[must_use]
    pub const fn with_parallel_parse_threshold(mut self, threshold: usize) -> Self {
        self.parallel_parse_threshold = threshold;
        self
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {key}={raw}: not a valid number");
            None
        }
    }
}
