//! Time-boxed snapshot cache in front of an observation source.
//!
//! The sheet changes at most weekly while the dashboard re-renders on
//! every filter interaction, so each fetched snapshot is shared for a
//! short TTL. The pipeline itself recomputes every aggregate fresh from
//! whatever snapshot it receives; only the network fetch is cached.

use std::sync::Arc;
use std::time::{Duration, Instant};

use screwworm_map_surveillance_models::Observation;
use tokio::sync::Mutex;

use crate::{FetchObservations, SourceError};

/// Default snapshot time-to-live.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

struct Snapshot {
    rows: Arc<Vec<Observation>>,
    fetched_at: Instant,
}

/// Caches the most recent snapshot of any [`FetchObservations`] source.
///
/// Concurrent callers share one snapshot; a failed refresh propagates its
/// error and leaves no snapshot behind, so the next caller retries.
pub struct CachedSource {
    fetcher: Box<dyn FetchObservations>,
    ttl: Duration,
    snapshot: Mutex<Option<Snapshot>>,
}

impl CachedSource {
    /// Wraps a fetcher with the given snapshot TTL.
    #[must_use]
    pub fn new(fetcher: Box<dyn FetchObservations>, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            snapshot: Mutex::new(None),
        }
    }

    /// Returns the current observation snapshot, refreshing it from the
    /// underlying source if the cached one has expired.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if a refresh is needed and fails.
    pub async fn rows(&self) -> Result<Arc<Vec<Observation>>, SourceError> {
        let mut guard = self.snapshot.lock().await;

        if let Some(snapshot) = guard.as_ref()
            && snapshot.fetched_at.elapsed() < self.ttl
        {
            return Ok(Arc::clone(&snapshot.rows));
        }

        let rows = Arc::new(self.fetcher.fetch().await?);
        log::info!("Refreshed observation snapshot: {} rows", rows.len());

        *guard = Some(Snapshot {
            rows: Arc::clone(&rows),
            fetched_at: Instant::now(),
        });

        Ok(rows)
    }

    /// Drops the cached snapshot so the next call re-fetches.
    pub async fn invalidate(&self) {
        *self.snapshot.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingFetcher {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingFetcher {
        const fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait::async_trait]
    impl FetchObservations for Arc<CountingFetcher> {
        async fn fetch(&self) -> Result<Vec<Observation>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SourceError::MissingColumn {
                    column: "Municipio_Yucatan".to_string(),
                });
            }
            Ok(vec![Observation::new(
                "TIZIMIN".into(),
                "2025-01-01".parse().unwrap(),
                10,
                10,
            )])
        }
    }

    #[tokio::test]
    async fn fresh_snapshot_is_shared_without_refetch() {
        let fetcher = Arc::new(CountingFetcher::new(false));
        let cache = CachedSource::new(Box::new(Arc::clone(&fetcher)), Duration::from_secs(60));

        let first = cache.rows().await.unwrap();
        let second = cache.rows().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_snapshot_triggers_refetch() {
        let fetcher = Arc::new(CountingFetcher::new(false));
        let cache = CachedSource::new(Box::new(Arc::clone(&fetcher)), Duration::ZERO);

        let _ = cache.rows().await.unwrap();
        let _ = cache.rows().await.unwrap();

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let fetcher = Arc::new(CountingFetcher::new(false));
        let cache = CachedSource::new(Box::new(Arc::clone(&fetcher)), Duration::from_secs(60));

        let _ = cache.rows().await.unwrap();
        cache.invalidate().await;
        let _ = cache.rows().await.unwrap();

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_refresh_propagates_and_leaves_no_snapshot() {
        let fetcher = Arc::new(CountingFetcher::new(true));
        let cache = CachedSource::new(Box::new(Arc::clone(&fetcher)), Duration::from_secs(60));

        assert!(cache.rows().await.is_err());
        assert!(cache.rows().await.is_err());

        // Each failed call retried the fetch; errors are not cached.
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }
}
