use std::sync::Mutex;

use crate::utils::{memory_loader, raw, school_record, two_sources};
use school_ingest::utils::NoopObserver;
use school_ingest::{
    LoadProgress, LoadSummary, MemorySource, ProgressObserver, Region, default_sources,
    schools_in_region,
};
use serde_json::json;

#[derive(Default)]
struct RecordingObserver {
    progress: Mutex<Vec<LoadProgress>>,
    summary: Mutex<Option<LoadSummary>>,
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&self, progress: &LoadProgress) {
        self.progress.lock().unwrap().push(progress.clone());
    }

    fn on_complete(&self, summary: &LoadSummary) {
        *self.summary.lock().unwrap() = Some(summary.clone());
    }
}

/// The same id in two sources keeps the record of the earlier source
#[tokio::test]
async fn test_cross_source_first_seen_wins() {
    let supplier = MemorySource::new()
        .with_records("Gauteng", vec![school_record("1001", "Source A School")])
        .with_records(
            "Limpopo",
            vec![
                school_record("1001", "Source B School"),
                school_record("2002", "Only In B"),
            ],
        );

    let load = memory_loader(supplier, two_sources()).load(&NoopObserver).await;

    let matching: Vec<_> = load.schools.iter().filter(|s| s.id == "1001").collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].name, "Source A School");
    assert_eq!(matching[0].region, Region::Gauteng);
    assert_eq!(load.summary.duplicates_removed, 1);
    assert_eq!(load.summary.final_count, 2);
}

/// Counts describe the loss at every stage
#[tokio::test]
async fn test_summary_counts() {
    let supplier = MemorySource::new()
        .with_records(
            "Gauteng",
            vec![
                school_record("1", "One"),
                school_record("1", "One Again"),
                raw(json!({ "Status": "OPEN" })),
                raw(json!({ "NatEmis": "3", "Status": "Closed" })),
            ],
        )
        .with_records("Limpopo", vec![school_record("4", "Four")]);

    let observer = RecordingObserver::default();
    let load = memory_loader(supplier, two_sources()).load(&observer).await;

    let summary = observer.summary.lock().unwrap().clone().expect("summary reported");
    assert_eq!(summary, load.summary);
    assert_eq!(summary.raw_count, 5);
    assert_eq!(summary.parsed_count, 3);
    assert_eq!(summary.duplicates_removed, 1);
    assert_eq!(summary.final_count, 2);
    assert_eq!(summary.sources[0].rejected(), 2);
    assert_eq!(summary.sources[1].parsed_count, 1);
}

/// A failing source contributes nothing while the others load
#[tokio::test]
async fn test_failing_source_isolated() {
    let supplier = MemorySource::new()
        .with_failure("Gauteng", "payload was not an array")
        .with_records("Limpopo", vec![school_record("7", "Seven")]);

    let load = memory_loader(supplier, two_sources()).load(&NoopObserver).await;

    assert_eq!(load.schools.len(), 1);
    assert_eq!(load.schools[0].region, Region::Limpopo);
    assert!(load.summary.sources[0].error.is_some());
    assert!(load.summary.sources[1].error.is_none());
}

/// Progress counts up once per source and names each finished source
#[tokio::test]
async fn test_progress_over_default_sources() {
    let observer = RecordingObserver::default();
    let sources = default_sources();
    let total = sources.len();

    memory_loader(MemorySource::new(), sources).load(&observer).await;

    let progress = observer.progress.lock().unwrap();
    assert_eq!(progress.len(), total + 1);
    assert!(progress.iter().all(|p| p.sources_total == total));
    assert!(progress[1..].iter().all(|p| p.current_source.is_some()));
    assert_eq!(progress.last().map(|p| p.sources_completed), Some(total));
}

/// Output follows configured source order, not completion order
#[tokio::test]
async fn test_output_in_source_order() {
    let mut sources = default_sources();
    sources.truncate(4);
    let supplier = sources.iter().enumerate().fold(MemorySource::new(), |supplier, (i, source)| {
        supplier.with_records(
            source.name.clone(),
            vec![school_record(&format!("{i}"), &source.name)],
        )
    });

    let load = memory_loader(supplier, sources.clone()).load(&NoopObserver).await;

    let names: Vec<_> = load.schools.iter().map(|s| s.name.as_str()).collect();
    let expected: Vec<_> = sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, expected);
    assert_eq!(schools_in_region(&load.schools, Region::Gauteng).len(), 1);
}
