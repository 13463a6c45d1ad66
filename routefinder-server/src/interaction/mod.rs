//! The click pipeline: nearest points, fastest point per mode, routes.
//!
//! A click is run against a [`CancelToken`]; if a newer click starts
//! first, the older one is dropped at its next await point and yields
//! [`InteractionError::Superseded`] instead of an outcome.

mod error;
mod tracker;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{LatLng, Point};
use crate::nearest::{DEFAULT_K, nearest_points};
use crate::route::{Route, RouteFetcher, RouteSource};
use crate::travel::{DurationSource, TravelResult, TravelTimeResolver};

pub use error::InteractionError;
pub use tracker::{CancelToken, InteractionTracker};

/// Everything one click produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionOutcome {
    pub id: u64,
    pub click: LatLng,
    /// Fastest point per mode, in mode order.
    pub results: Vec<TravelResult>,
    /// Route per result whose geometry could be fetched.
    pub routes: Vec<Route>,
}

/// Runs finder, resolver and route fetcher in sequence.
pub struct ClickPipeline<D, R> {
    resolver: TravelTimeResolver<D>,
    fetcher: RouteFetcher<R>,
    k: usize,
}

impl<D, R> ClickPipeline<D, R>
where
    D: DurationSource + Sync,
    R: RouteSource + Sync,
{
    pub fn new(resolver: TravelTimeResolver<D>, fetcher: RouteFetcher<R>) -> Self {
        Self {
            resolver,
            fetcher,
            k: DEFAULT_K,
        }
    }

    /// Override the number of nearest candidates.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[cfg(test)]
    pub(crate) fn resolver(&self) -> &TravelTimeResolver<D> {
        &self.resolver
    }

    /// Run the whole pipeline without cancellation.
    ///
    /// An empty point set yields no results and issues no requests.
    pub async fn run(&self, click: LatLng, points: &[Point]) -> (Vec<TravelResult>, Vec<Route>) {
        let candidates: Vec<Point> = nearest_points(click, points, self.k)
            .into_iter()
            .map(|ranked| ranked.point.clone())
            .collect();
        debug!(%click, candidates = candidates.len(), "nearest candidates selected");

        let results = self.resolver.resolve(click, &candidates).await;
        let routes = self.fetcher.fetch_routes(click, &results).await;
        (results, routes)
    }

    /// Run the pipeline for one interaction, stopping early if superseded.
    pub async fn run_interaction(
        &self,
        token: &CancelToken,
        click: LatLng,
        points: &[Point],
    ) -> Result<InteractionOutcome, InteractionError> {
        let id = token.id();
        tokio::select! {
            biased;
            () = token.cancelled() => {
                info!(id, "interaction superseded");
                Err(InteractionError::Superseded { id })
            }
            (results, routes) = self.run(click, points) => {
                info!(id, results = results.len(), routes = routes.len(), "interaction complete");
                Ok(InteractionOutcome { id, click, results, routes })
            }
        }
    }
}
