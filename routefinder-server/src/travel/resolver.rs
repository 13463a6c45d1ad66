//! Per-mode fastest destination selection.
//!
//! For each transport mode the resolver fetches (or reuses) the durations
//! from the click location to every candidate and keeps the single
//! fastest one. A mode whose durations cannot be obtained is logged and
//! left out; the remaining modes are unaffected.

use std::future::Future;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{LatLng, Point, TravelMode};
use crate::ors::{OrsClient, OrsError};

use super::cache::{CachePolicy, MatrixKey, TravelTimeCache};
use super::format::format_duration;

/// Trait for providing duration matrices.
///
/// This abstraction allows the resolver to be tested without the network.
pub trait DurationSource {
    /// Durations in seconds from `origin` to each destination, in order.
    fn duration_matrix(
        &self,
        mode: TravelMode,
        origin: LatLng,
        destinations: &[LatLng],
    ) -> impl Future<Output = Result<Vec<Option<f64>>, OrsError>> + Send;
}

impl DurationSource for OrsClient {
    async fn duration_matrix(
        &self,
        mode: TravelMode,
        origin: LatLng,
        destinations: &[LatLng],
    ) -> Result<Vec<Option<f64>>, OrsError> {
        OrsClient::duration_matrix(self, mode, origin, destinations).await
    }
}

/// The fastest destination for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelResult {
    pub mode: TravelMode,
    pub origin: LatLng,
    pub destination: Point,
    /// Seconds.
    pub duration_secs: f64,
    pub formatted: String,
    pub color: &'static str,
}

/// Index and duration of the smallest known duration.
///
/// Unknown (`None`) and non-finite entries are ignored. On ties the first
/// entry wins.
pub fn fastest_index(durations: &[Option<f64>]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, duration) in durations.iter().enumerate() {
        let Some(d) = duration.filter(|d| d.is_finite()) else {
            continue;
        };
        if best.is_none_or(|(_, min)| d < min) {
            best = Some((idx, d));
        }
    }
    best
}

/// Resolves the fastest candidate per transport mode.
pub struct TravelTimeResolver<S> {
    source: S,
    cache: TravelTimeCache,
}

impl<S: DurationSource> TravelTimeResolver<S> {
    /// Create a resolver with the given cache policy.
    pub fn new(source: S, policy: &CachePolicy) -> Self {
        Self {
            source,
            cache: TravelTimeCache::new(policy),
        }
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &TravelTimeCache {
        &self.cache
    }

    /// Fastest candidate for every mode, in [`TravelMode::ALL`] order.
    ///
    /// Modes that fail or have no reachable candidate are absent.
    pub async fn resolve(&self, origin: LatLng, candidates: &[Point]) -> Vec<TravelResult> {
        let per_mode = TravelMode::ALL
            .into_iter()
            .map(|mode| self.resolve_mode(mode, origin, candidates));

        join_all(per_mode).await.into_iter().flatten().collect()
    }

    /// Fastest candidate for a single mode.
    pub async fn resolve_mode(
        &self,
        mode: TravelMode,
        origin: LatLng,
        candidates: &[Point],
    ) -> Option<TravelResult> {
        if candidates.is_empty() {
            return None;
        }

        let destinations: Vec<LatLng> = candidates.iter().map(|p| p.location).collect();
        let key = MatrixKey::new(mode, origin, destinations.clone());

        let fetch = async move {
            debug!(
                mode = mode.profile(),
                cached = self.cache.entry_count(),
                "duration cache miss, querying matrix"
            );
            self.source
                .duration_matrix(mode, origin, &destinations)
                .await
        };

        let durations = match self.cache.get_or_fetch(key, fetch).await {
            Ok(row) => row,
            Err(e) => {
                warn!(mode = mode.profile(), error = %e, "duration matrix unavailable, skipping mode");
                return None;
            }
        };

        let Some((idx, secs)) = fastest_index(&durations[..durations.len().min(candidates.len())])
        else {
            warn!(mode = mode.profile(), "no reachable candidate, skipping mode");
            return None;
        };

        let destination = candidates[idx].clone();
        debug!(
            mode = mode.profile(),
            point = %destination.id,
            duration_secs = secs,
            "fastest point selected"
        );

        Some(TravelResult {
            mode,
            origin,
            destination,
            duration_secs: secs,
            formatted: format_duration(secs),
            color: mode.color(),
        })
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
