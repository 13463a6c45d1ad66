//! Caching layer for duration matrix responses.
//!
//! Entries are keyed by the full request shape (mode, origin, ordered
//! destinations), so two clicks at the same spot against the same
//! candidates reuse one response. The default policy never evicts:
//! entries live as long as the process.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{LatLng, TravelMode};
use crate::ors::OrsError;

/// Cached durations for one matrix request, destination order preserved.
pub type DurationRow = Arc<Vec<Option<f64>>>;

/// Cache key for a matrix request.
///
/// Two keys are equal when mode, origin and the destination sequence are
/// identical, coordinate by coordinate. Destination order is significant
/// because the cached row is positional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatrixKey {
    pub mode: TravelMode,
    pub origin: LatLng,
    pub destinations: Vec<LatLng>,
}

impl MatrixKey {
    pub fn new(mode: TravelMode, origin: LatLng, destinations: Vec<LatLng>) -> Self {
        Self {
            mode,
            origin,
            destinations,
        }
    }
}

/// Eviction policy for the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachePolicy {
    /// Maximum number of cached entries; `None` is unbounded.
    pub max_capacity: Option<u64>,

    /// TTL for cached entries; `None` keeps entries forever.
    pub time_to_live: Option<Duration>,
}

impl CachePolicy {
    /// Never evict.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Bound the number of entries.
    pub fn with_max_capacity(mut self, n: u64) -> Self {
        self.max_capacity = Some(n);
        self
    }

    /// Expire entries after `ttl`.
    pub fn with_time_to_live(mut self, ttl: Duration) -> Self {
        self.time_to_live = Some(ttl);
        self
    }
}

/// Cache for duration matrix rows.
#[derive(Clone)]
pub struct TravelTimeCache {
    rows: MokaCache<MatrixKey, DurationRow>,
}

impl TravelTimeCache {
    /// Create a new cache with the given policy.
    pub fn new(policy: &CachePolicy) -> Self {
        let mut builder = MokaCache::builder();
        if let Some(n) = policy.max_capacity {
            builder = builder.max_capacity(n);
        }
        if let Some(ttl) = policy.time_to_live {
            builder = builder.time_to_live(ttl);
        }

        Self {
            rows: builder.build(),
        }
    }

    /// Return the cached row for `key`, or run `fetch` and cache its result.
    ///
    /// Concurrent callers with the same key share one `fetch`. Failures are
    /// not cached.
    pub async fn get_or_fetch<F>(&self, key: MatrixKey, fetch: F) -> Result<DurationRow, Arc<OrsError>>
    where
        F: Future<Output = Result<Vec<Option<f64>>, OrsError>>,
    {
        self.rows
            .try_get_with(key, async move { fetch.await.map(Arc::new) })
            .await
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.rows.entry_count()
    }
}
