//! Single-flight cache over the school collection
//!
//! [`SchoolCache`] owns the result of one [`SchoolLoader::load`]. Callers that ask
//! while a load is in flight await that same load instead of starting another one.
//! [`SchoolCache::reset`] empties the cache; a load that was in flight during the
//! reset still answers its waiters but is not stored.

use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::error::{IngestError, Result};
use crate::loader::{ProgressObserver, SchoolLoad, SchoolLoader};
use crate::utils::NoopObserver;

type SharedLoad = Shared<BoxFuture<'static, Arc<SchoolLoad>>>;

/// Lifecycle of the cached collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Empty,
    Loading,
    Ready,
}

enum CacheState {
    Empty,
    Loading(SharedLoad),
    Ready(Arc<SchoolLoad>),
}

struct Inner {
    state: CacheState,
    /// Bumped by every reset so stale loads can tell they were discarded
    generation: u64,
}

/// Memoized school collection with a single in-flight load
pub struct SchoolCache {
    loader: Arc<SchoolLoader>,
    observer: Arc<dyn ProgressObserver>,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for SchoolCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchoolCache")
            .field("loader", &self.loader)
            .field("status", &self.status().ok())
            .finish_non_exhaustive()
    }
}

impl SchoolCache {
    /// Empty cache loading through `loader`
    #[must_use]
    pub fn new(loader: SchoolLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            observer: Arc::new(NoopObserver),
            inner: Mutex::new(Inner {
                state: CacheState::Empty,
                generation: 0,
            }),
        }
    }

    /// Report progress of future loads to `observer`
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The cached collection, loading it first if needed
    ///
    /// Concurrent callers share one load. Only a poisoned lock makes this fail.
    pub async fn get_or_load(&self) -> Result<Arc<SchoolLoad>> {
        let (task, generation) = {
            let mut inner = self.lock()?;
            let in_flight = match &inner.state {
                CacheState::Ready(load) => return Ok(Arc::clone(load)),
                CacheState::Loading(task) => Some(task.clone()),
                CacheState::Empty => None,
            };
            let task = in_flight.unwrap_or_else(|| {
                let task = self.start_load();
                inner.state = CacheState::Loading(task.clone());
                task
            });
            (task, inner.generation)
        };

        let load = task.await;

        let mut inner = self.lock()?;
        if inner.generation == generation && matches!(inner.state, CacheState::Loading(_)) {
            inner.state = CacheState::Ready(Arc::clone(&load));
        }

        Ok(load)
    }

    /// Drop the cached collection
    ///
    /// The next [`get_or_load`](Self::get_or_load) starts a fresh load.
    pub fn reset(&self) -> Result<()> {
        let mut inner = self.lock()?;
        inner.generation += 1;
        inner.state = CacheState::Empty;
        log::debug!("School cache reset (generation {})", inner.generation);
        Ok(())
    }

    /// Current lifecycle state
    pub fn status(&self) -> Result<CacheStatus> {
        Ok(match self.lock()?.state {
            CacheState::Empty => CacheStatus::Empty,
            CacheState::Loading(_) => CacheStatus::Loading,
            CacheState::Ready(_) => CacheStatus::Ready,
        })
    }

    /// The cached collection if a load already completed
    pub fn peek(&self) -> Result<Option<Arc<SchoolLoad>>> {
        Ok(match &self.lock()?.state {
            CacheState::Ready(load) => Some(Arc::clone(load)),
            _ => None,
        })
    }

    fn start_load(&self) -> SharedLoad {
        let loader = Arc::clone(&self.loader);
        let observer = Arc::clone(&self.observer);
        async move { Arc::new(loader.load(observer.as_ref()).await) }
            .boxed()
            .shared()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| {
            IngestError::InvalidOperation("Failed to acquire lock on school cache".to_string())
        })
    }
}
