//! Multi-source school loading
//!
//! [`SchoolLoader`] fans out over the configured sources, retrieving and parsing each
//! one independently, then fans back in: sub-batches are concatenated in configured
//! source order and deduplicated once over the whole collection. A source that fails,
//! times out, or yields a malformed payload contributes nothing; the load itself
//! never fails.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use itertools::Itertools;
use serde::Serialize;

use crate::async_io::JsonDirSource;
use crate::collections::deduplicate;
use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::models::{Region, School};
use crate::registry::{ParseOptions, RecordSource, SourceConfig, default_sources, parse_batch};

/// Incremental progress of a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProgress {
    /// Sources finished so far, failed ones included
    pub sources_completed: usize,
    /// Number of configured sources
    pub sources_total: usize,
    /// Source that just finished; `None` on the initial notification
    pub current_source: Option<String>,
}

impl LoadProgress {
    /// Whether every source has finished
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.sources_completed >= self.sources_total
    }
}

/// Receiver of load progress notifications
pub trait ProgressObserver: Send + Sync {
    /// Called once before any source finishes, then after each source
    fn on_progress(&self, progress: &LoadProgress);

    /// Called once with the final summary
    fn on_complete(&self, _summary: &LoadSummary) {}
}

/// Outcome of a single source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub name: String,
    pub region: Region,
    /// Records retrieved, before admission
    pub raw_count: usize,
    /// Records that survived assembly
    pub parsed_count: usize,
    /// Why the source contributed nothing, if it failed
    pub error: Option<String>,
}

impl SourceReport {
    /// Records dropped during assembly
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.raw_count.saturating_sub(self.parsed_count)
    }
}

/// Counts describing data loss at each stage of a load
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadSummary {
    pub raw_count: usize,
    pub parsed_count: usize,
    pub duplicates_removed: usize,
    pub final_count: usize,
    /// Per-source reports in configured order
    pub sources: Vec<SourceReport>,
}

impl LoadSummary {
    /// Reports of sources that failed
    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|report| report.error.is_some())
    }
}

/// Result of a completed load
#[derive(Debug, Clone, Default)]
pub struct SchoolLoad {
    /// Deduplicated schools in configured source order
    pub schools: Vec<School>,
    pub summary: LoadSummary,
}

/// Loader over a fixed list of sources and a supplier that retrieves them
#[derive(Clone)]
pub struct SchoolLoader {
    sources: Vec<SourceConfig>,
    supplier: Arc<dyn RecordSource>,
    options: ParseOptions,
    fetch_timeout: Duration,
    max_concurrent_sources: usize,
}

impl std::fmt::Debug for SchoolLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchoolLoader")
            .field("sources", &self.sources)
            .field("supplier", &self.supplier.describe())
            .field("fetch_timeout", &self.fetch_timeout)
            .field("max_concurrent_sources", &self.max_concurrent_sources)
            .finish_non_exhaustive()
    }
}

impl SchoolLoader {
    /// Loader for the ten default sources served by `supplier`
    #[must_use]
    pub fn new(supplier: Arc<dyn RecordSource>, config: &IngestConfig) -> Self {
        Self {
            sources: default_sources(),
            supplier,
            options: ParseOptions::from(config),
            fetch_timeout: config.fetch_timeout,
            max_concurrent_sources: config.max_concurrent_sources.max(1),
        }
    }

    /// Loader reading the default sources from `config.data_dir`
    #[must_use]
    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(Arc::new(JsonDirSource::new(&config.data_dir)), config)
    }

    /// Replace the source list; earlier sources win identity collisions
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<SourceConfig>) -> Self {
        self.sources = sources;
        self
    }

    /// Configured sources, in precedence order
    #[must_use]
    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    /// Load, parse, and deduplicate all sources
    ///
    /// Sources are retrieved concurrently (up to the configured limit), each within
    /// the fetch timeout. Progress is reported as sources finish, in completion
    /// order; the resulting collection always follows configured order.
    pub async fn load(&self, observer: &dyn ProgressObserver) -> SchoolLoad {
        let start = Instant::now();
        let total = self.sources.len();
        log::info!(
            "Loading {} school sources from {}",
            total,
            self.supplier.describe()
        );
        observer.on_progress(&LoadProgress {
            sources_completed: 0,
            sources_total: total,
            current_source: None,
        });

        let options = Arc::new(self.options.clone());
        let mut pending = stream::iter(self.sources.iter().cloned().enumerate())
            .map(|(index, source)| {
                let task = tokio::spawn(load_source(
                    source.clone(),
                    Arc::clone(&self.supplier),
                    Arc::clone(&options),
                    self.fetch_timeout,
                ));
                async move {
                    let outcome = match task.await {
                        Ok(outcome) => outcome,
                        Err(e) => SourceOutcome::failed(&source, 0, &IngestError::from(e)),
                    };
                    (index, outcome)
                }
            })
            .buffer_unordered(self.max_concurrent_sources);

        let mut outcomes = Vec::with_capacity(total);
        while let Some((index, outcome)) = pending.next().await {
            observer.on_progress(&LoadProgress {
                sources_completed: outcomes.len() + 1,
                sources_total: total,
                current_source: Some(outcome.report.name.clone()),
            });
            outcomes.push((index, outcome));
        }

        outcomes.sort_unstable_by_key(|(index, _)| *index);
        let (reports, batches): (Vec<_>, Vec<_>) = outcomes
            .into_iter()
            .map(|(_, outcome)| (outcome.report, outcome.schools))
            .unzip();

        let combined = batches.into_iter().concat();
        let parsed_count = combined.len();
        let schools = deduplicate(combined);

        let summary = LoadSummary {
            raw_count: reports.iter().map(|report| report.raw_count).sum(),
            parsed_count,
            duplicates_removed: parsed_count - schools.len(),
            final_count: schools.len(),
            sources: reports,
        };
        log_summary(&summary, start.elapsed());
        observer.on_complete(&summary);

        SchoolLoad { schools, summary }
    }
}

struct SourceOutcome {
    report: SourceReport,
    schools: Vec<School>,
}

impl SourceOutcome {
    fn failed(source: &SourceConfig, raw_count: usize, error: &IngestError) -> Self {
        log::warn!("Failed to load {}: {error}", source.name);
        Self {
            report: SourceReport {
                name: source.name.clone(),
                region: source.region,
                raw_count,
                parsed_count: 0,
                error: Some(error.to_string()),
            },
            schools: Vec::new(),
        }
    }
}

async fn load_source(
    source: SourceConfig,
    supplier: Arc<dyn RecordSource>,
    options: Arc<ParseOptions>,
    fetch_timeout: Duration,
) -> SourceOutcome {
    let fetched = match tokio::time::timeout(fetch_timeout, supplier.fetch(&source)).await {
        Ok(fetched) => fetched,
        Err(_) => Err(IngestError::Timeout {
            source_name: source.name.clone(),
            seconds: fetch_timeout.as_secs(),
        }),
    };
    let records = match fetched {
        Ok(records) => records,
        Err(e) => return SourceOutcome::failed(&source, 0, &e),
    };

    let raw_count = records.len();
    let region = source.region;
    let parsed =
        tokio::task::spawn_blocking(move || parse_batch(records, region, &options)).await;

    match parsed {
        Ok(schools) => {
            log::debug!(
                "{}: {} raw records, {} schools",
                source.name,
                raw_count,
                schools.len()
            );
            SourceOutcome {
                report: SourceReport {
                    name: source.name,
                    region,
                    raw_count,
                    parsed_count: schools.len(),
                    error: None,
                },
                schools,
            }
        }
        Err(e) => SourceOutcome::failed(&source, raw_count, &IngestError::from(e)),
    }
}

fn log_summary(summary: &LoadSummary, elapsed: Duration) {
    log::info!("=== SCHOOLS DATA SUMMARY ===");
    log::info!("Total raw records: {}", summary.raw_count);
    log::info!("Total parsed schools: {}", summary.parsed_count);
    log::info!("Duplicates removed: {}", summary.duplicates_removed);
    log::info!("Final school count: {}", summary.final_count);

    for report in &summary.sources {
        if report.rejected() > 0 {
            log::info!(
                "{}: {} raw → {} parsed ({} filtered out)",
                report.name,
                report.raw_count,
                report.parsed_count,
                report.rejected()
            );
        }
    }
    for report in summary.failed_sources() {
        log::warn!(
            "{} contributed no schools: {}",
            report.name,
            report.error.as_deref().unwrap_or_default()
        );
    }

    log::info!("Loaded all sources in {elapsed:?}");
}
