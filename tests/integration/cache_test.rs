use std::sync::Arc;
use std::time::Duration;

use crate::utils::{school_record, two_sources};
use school_ingest::{CacheStatus, IngestConfig, MemorySource, SchoolCache, SchoolLoader};

fn cache(supplier: Arc<MemorySource>) -> SchoolCache {
    SchoolCache::new(SchoolLoader::new(supplier, &IngestConfig::default()).with_sources(two_sources()))
}

/// Many concurrent callers trigger exactly one load
#[tokio::test]
async fn test_single_flight() -> school_ingest::Result<()> {
    let supplier = Arc::new(
        MemorySource::new()
            .with_records("Gauteng", vec![school_record("1", "One")])
            .with_delay(Duration::from_millis(25)),
    );
    let cache = Arc::new(cache(Arc::clone(&supplier)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_or_load().await })
        })
        .collect();

    let mut loads = Vec::new();
    for handle in handles {
        loads.push(handle.await??);
    }

    assert!(loads.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    // One fetch per configured source
    assert_eq!(supplier.fetch_count(), 2);
    assert_eq!(cache.status()?, CacheStatus::Ready);
    Ok(())
}

/// Reset empties the cache and the next request reloads
#[tokio::test]
async fn test_reset() -> school_ingest::Result<()> {
    let supplier = Arc::new(MemorySource::new().with_records("Limpopo", vec![school_record("2", "Two")]));
    let cache = cache(Arc::clone(&supplier));

    assert!(cache.peek()?.is_none());
    let first = cache.get_or_load().await?;
    assert_eq!(first.schools.len(), 1);
    assert!(cache.peek()?.is_some());

    cache.reset()?;
    assert_eq!(cache.status()?, CacheStatus::Empty);

    cache.get_or_load().await?;
    assert_eq!(supplier.fetch_count(), 4);
    Ok(())
}
