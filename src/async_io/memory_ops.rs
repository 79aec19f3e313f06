//! In-memory record supplier
//! Serves pre-decoded records keyed by source name, for embedding and tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::error::IngestError;
use crate::registry::{FetchFuture, RecordSource, SourceConfig};
use crate::schema::RawRecord;

#[derive(Debug, Clone)]
enum Entry {
    Records(Vec<RawRecord>),
    Failure(String),
}

/// Supplier backed by records held in memory
///
/// Sources with no entry yield an empty batch. Entries registered as failures
/// resolve to [`IngestError::InvalidPayload`].
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: FxHashMap<String, Entry>,
    delay: Option<Duration>,
    fetches: AtomicUsize,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `records` for the source named `name`
    #[must_use]
    pub fn with_records(mut self, name: impl Into<String>, records: Vec<RawRecord>) -> Self {
        self.entries.insert(name.into(), Entry::Records(records));
        self
    }

    /// Fail every fetch of the source named `name` with `message`
    #[must_use]
    pub fn with_failure(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.entries.insert(name.into(), Entry::Failure(message.into()));
        self
    }

    /// Sleep for `delay` before answering each fetch
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl RecordSource for MemorySource {
    fn describe(&self) -> String {
        format!("in-memory records for {} sources", self.entries.len())
    }

    fn fetch<'a>(&'a self, source: &'a SourceConfig) -> FetchFuture<'a> {
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            match self.entries.get(&source.name) {
                Some(Entry::Records(records)) => Ok(records.clone()),
                Some(Entry::Failure(message)) => Err(IngestError::InvalidPayload(format!(
                    "{}: {message}",
                    source.name
                ))),
                None => Ok(Vec::new()),
            }
        })
    }
}
