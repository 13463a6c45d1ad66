//! Route geometry fetching.
//!
//! Requests the path from the click location to each mode's fastest
//! point. Modes are fetched concurrently and awaited together, so the
//! output order is the input order regardless of completion order. A
//! failed route only removes that mode's line.

use std::future::Future;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, error};

use crate::domain::{LatLng, TravelMode};
use crate::ors::{OrsClient, OrsError};
use crate::travel::TravelResult;

/// Trait for providing route geometries.
pub trait RouteSource {
    /// Path from `from` to `to`, in map order.
    fn route(
        &self,
        mode: TravelMode,
        from: LatLng,
        to: LatLng,
    ) -> impl Future<Output = Result<Vec<LatLng>, OrsError>> + Send;
}

impl RouteSource for OrsClient {
    async fn route(
        &self,
        mode: TravelMode,
        from: LatLng,
        to: LatLng,
    ) -> Result<Vec<LatLng>, OrsError> {
        self.directions(mode, from, to).await
    }
}

/// A drawable route for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub mode: TravelMode,
    pub path: Vec<LatLng>,
    /// CSS class of the polyline, e.g. `route-voiture`.
    pub css_class: String,
}

impl Route {
    pub fn new(mode: TravelMode, path: Vec<LatLng>) -> Self {
        Self {
            mode,
            path,
            css_class: format!("route-{}", mode.css_suffix()),
        }
    }
}

/// Fetches route geometries for fastest points.
pub struct RouteFetcher<S> {
    source: S,
}

impl<S: RouteSource> RouteFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch one route.
    pub async fn fetch_route(
        &self,
        mode: TravelMode,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Route, OrsError> {
        let path = self.source.route(mode, origin, destination).await?;
        if path.is_empty() {
            return Err(OrsError::InvalidGeometry("empty coordinate list"));
        }
        Ok(Route::new(mode, path))
    }

    /// Fetch the route for every travel result.
    ///
    /// Failed modes are logged and omitted. The remaining routes keep the
    /// order of `results`.
    pub async fn fetch_routes(&self, origin: LatLng, results: &[TravelResult]) -> Vec<Route> {
        let requests = results.iter().map(|result| async move {
            let mode = result.mode;
            match self
                .fetch_route(mode, origin, result.destination.location)
                .await
            {
                Ok(route) => {
                    debug!(mode = mode.profile(), points = route.path.len(), "route fetched");
                    Some(route)
                }
                Err(e) => {
                    error!(mode = mode.profile(), error = %e, "failed to fetch route");
                    None
                }
            }
        });

        join_all(requests).await.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, PointId};
    use crate::travel::format_duration;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Route source answering per mode, optionally after a delay.
    struct MockRoutes {
        paths: HashMap<TravelMode, Option<Vec<[f64; 2]>>>,
        delays_ms: HashMap<TravelMode, u64>,
    }

    impl RouteSource for MockRoutes {
        async fn route(
            &self,
            mode: TravelMode,
            _from: LatLng,
            _to: LatLng,
        ) -> Result<Vec<LatLng>, OrsError> {
            if let Some(ms) = self.delays_ms.get(&mode) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            match self.paths.get(&mode) {
                Some(Some(path)) => Ok(path.iter().map(|p| LatLng::new(p[0], p[1])).collect()),
                _ => Err(OrsError::Api {
                    status: 500,
                    message: "mock failure".into(),
                }),
            }
        }
    }

    fn result(mode: TravelMode, id: u32) -> TravelResult {
        TravelResult {
            mode,
            origin: LatLng::new(0.0, 0.0),
            destination: Point::new(PointId(id), LatLng::new(0.0, id as f64), None),
            duration_secs: 60.0,
            formatted: format_duration(60.0),
            color: mode.color(),
        }
    }

    #[test]
    fn css_class_uses_label() {
        assert_eq!(Route::new(TravelMode::Car, vec![]).css_class, "route-voiture");
        assert_eq!(Route::new(TravelMode::Walking, vec![]).css_class, "route-marche");
    }

    #[tokio::test]
    async fn order_follows_input_not_completion() {
        let fetcher = RouteFetcher::new(MockRoutes {
            paths: HashMap::from([
                (TravelMode::Walking, Some(vec![[0.0, 0.0], [0.0, 1.0]])),
                (TravelMode::Car, Some(vec![[0.0, 0.0], [0.0, 2.0]])),
            ]),
            delays_ms: HashMap::from([(TravelMode::Walking, 30)]),
        });

        let routes = fetcher
            .fetch_routes(
                LatLng::new(0.0, 0.0),
                &[result(TravelMode::Walking, 1), result(TravelMode::Car, 2)],
            )
            .await;

        let modes: Vec<TravelMode> = routes.iter().map(|r| r.mode).collect();
        assert_eq!(modes, vec![TravelMode::Walking, TravelMode::Car]);
    }

    #[tokio::test]
    async fn failed_route_is_omitted() {
        let fetcher = RouteFetcher::new(MockRoutes {
            paths: HashMap::from([
                (TravelMode::Walking, Some(vec![[0.0, 0.0], [0.0, 1.0]])),
                (TravelMode::Car, None),
                (TravelMode::HeavyTruck, Some(vec![[0.0, 0.0], [0.0, 3.0]])),
            ]),
            delays_ms: HashMap::new(),
        });

        let routes = fetcher
            .fetch_routes(
                LatLng::new(0.0, 0.0),
                &[
                    result(TravelMode::Walking, 1),
                    result(TravelMode::Car, 2),
                    result(TravelMode::HeavyTruck, 3),
                ],
            )
            .await;

        let modes: Vec<TravelMode> = routes.iter().map(|r| r.mode).collect();
        assert_eq!(modes, vec![TravelMode::Walking, TravelMode::HeavyTruck]);
        assert_eq!(routes[1].path.last(), Some(&LatLng::new(0.0, 3.0)));
    }

    #[tokio::test]
    async fn empty_path_is_an_error() {
        let fetcher = RouteFetcher::new(MockRoutes {
            paths: HashMap::from([(TravelMode::Car, Some(vec![]))]),
            delays_ms: HashMap::new(),
        });

        let result = fetcher
            .fetch_route(TravelMode::Car, LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0))
            .await;
        assert!(matches!(result, Err(OrsError::InvalidGeometry(_))));
    }

    #[tokio::test]
    async fn no_results_no_routes() {
        let fetcher = RouteFetcher::new(MockRoutes {
            paths: HashMap::new(),
            delays_ms: HashMap::new(),
        });
        assert!(fetcher.fetch_routes(LatLng::new(0.0, 0.0), &[]).await.is_empty());
    }
}
