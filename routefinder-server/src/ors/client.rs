//! OpenRouteService HTTP client.
//!
//! Provides async methods for the matrix and directions endpoints.
//! Handles authentication, concurrency limiting, and conversion to
//! domain types.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{LatLng, TravelMode};

use super::error::OrsError;
use super::types::{DirectionsRequest, DirectionsResponse, MatrixRequest, MatrixResponse};

/// Default base URL for the public OpenRouteService API.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Accept header sent with every request.
const ACCEPT_VALUE: &str =
    "application/json, application/geo+json, application/gpx+xml, img/png; charset=utf-8";

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct OrsConfig {
    /// API key sent in the `Authorization` header
    pub api_key: String,
    /// Base URL for the API (defaults to the public service)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl OrsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// OpenRouteService API client.
///
/// Cheap to clone; clones share the connection pool and the semaphore
/// that bounds in-flight requests.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl OrsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OrsConfig) -> Result<Self, OrsError> {
        let mut headers = HeaderMap::new();

        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| OrsError::InvalidApiKey)?;
        headers.insert(AUTHORIZATION, api_key);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Durations in seconds from `origin` to each destination, in order.
    ///
    /// `None` entries are destinations the service could not route to.
    pub async fn duration_matrix(
        &self,
        mode: TravelMode,
        origin: LatLng,
        destinations: &[LatLng],
    ) -> Result<Vec<Option<f64>>, OrsError> {
        let url = format!("{}/v2/matrix/{}", self.base_url, mode.profile());
        let wire: Vec<[f64; 2]> = destinations.iter().map(|d| d.to_lng_lat()).collect();
        let body = MatrixRequest::durations_from(origin.to_lng_lat(), &wire);

        let response: MatrixResponse = self.post_json(&url, &body).await?;
        response.origin_row().ok_or(OrsError::MissingDurations)
    }

    /// Path geometry between two locations, in map order.
    pub async fn directions(
        &self,
        mode: TravelMode,
        from: LatLng,
        to: LatLng,
    ) -> Result<Vec<LatLng>, OrsError> {
        let url = format!("{}/v2/directions/{}/geojson", self.base_url, mode.profile());
        let body = DirectionsRequest {
            coordinates: vec![from.to_lng_lat(), to.to_lng_lat()],
        };

        let response: DirectionsResponse = self.post_json(&url, &body).await?;

        let geometry = response
            .features
            .and_then(|features| features.into_iter().next())
            .and_then(|feature| feature.geometry)
            .ok_or(OrsError::InvalidGeometry("no feature geometry"))?;

        geometry
            .coordinates
            .into_iter()
            .map(|position| match position.as_slice() {
                [lng, lat, ..] => Ok(LatLng::from_lng_lat([*lng, *lat])),
                _ => Err(OrsError::InvalidGeometry("position with fewer than 2 values")),
            })
            .collect()
    }

    /// POST a JSON body and decode a JSON response.
    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, OrsError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| OrsError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        debug!(%url, status = status.as_u16(), "routing API response");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(OrsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OrsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| OrsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> OrsClient {
        OrsClient::new(OrsConfig::new("test-key").with_base_url(server.base_url())).unwrap()
    }

    #[test]
    fn config_builder() {
        let config = OrsConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, Some(60));
    }

    #[test]
    fn config_defaults() {
        let config = OrsConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn rejects_api_key_with_newline() {
        let result = OrsClient::new(OrsConfig::new("bad\nkey"));
        assert!(matches!(result, Err(OrsError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn matrix_sends_lng_lat_and_slices_origin() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v2/matrix/driving-car")
                    .header("Authorization", "test-key")
                    .json_body(json!({
                        "locations": [[2.0, 1.0], [4.0, 3.0], [6.0, 5.0]],
                        "metrics": ["duration"],
                        "units": "m"
                    }));
                then.status(200)
                    .json_body(json!({"durations": [[0.0, 300.0, 90.0], [1.0, 0.0, 2.0], [3.0, 4.0, 0.0]]}));
            })
            .await;

        let durations = client(&server)
            .duration_matrix(
                TravelMode::Car,
                LatLng::new(1.0, 2.0),
                &[LatLng::new(3.0, 4.0), LatLng::new(5.0, 6.0)],
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(durations, vec![Some(300.0), Some(90.0)]);
    }

    #[tokio::test]
    async fn matrix_without_durations_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v2/matrix/foot-walking");
                then.status(200).json_body(json!({"metadata": {}}));
            })
            .await;

        let result = client(&server)
            .duration_matrix(TravelMode::Walking, LatLng::new(0.0, 0.0), &[LatLng::new(0.0, 1.0)])
            .await;

        assert!(matches!(result, Err(OrsError::MissingDurations)));
    }

    #[tokio::test]
    async fn status_codes_map_to_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v2/matrix/driving-hgv");
                then.status(403).body("forbidden");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v2/matrix/driving-car");
                then.status(429);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v2/matrix/foot-walking");
                then.status(500).body("boom");
            })
            .await;

        let c = client(&server);
        let origin = LatLng::new(0.0, 0.0);
        let dest = [LatLng::new(0.0, 1.0)];

        let truck = c.duration_matrix(TravelMode::HeavyTruck, origin, &dest).await;
        assert!(matches!(truck, Err(OrsError::Unauthorized)));

        let car = c.duration_matrix(TravelMode::Car, origin, &dest).await;
        assert!(matches!(car, Err(OrsError::RateLimited)));

        match c.duration_matrix(TravelMode::Walking, origin, &dest).await {
            Err(OrsError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_json_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v2/matrix/driving-car");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let result = client(&server)
            .duration_matrix(TravelMode::Car, LatLng::new(0.0, 0.0), &[LatLng::new(0.0, 1.0)])
            .await;

        match result {
            Err(OrsError::Json { body, .. }) => assert_eq!(body.as_deref(), Some("<html>oops</html>")),
            other => panic!("expected JSON error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn directions_reverses_to_lat_lng() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v2/directions/foot-walking/geojson")
                    .json_body(json!({"coordinates": [[2.0, 1.0], [4.0, 3.0]]}));
                then.status(200).json_body(json!({
                    "type": "FeatureCollection",
                    "features": [{
                        "type": "Feature",
                        "geometry": {"type": "LineString", "coordinates": [[2.0, 1.0], [3.0, 2.0], [4.0, 3.0]]}
                    }]
                }));
            })
            .await;

        let path = client(&server)
            .directions(TravelMode::Walking, LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            path,
            vec![LatLng::new(1.0, 2.0), LatLng::new(2.0, 3.0), LatLng::new(3.0, 4.0)]
        );
    }

    #[tokio::test]
    async fn directions_without_features_is_invalid_geometry() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v2/directions/driving-car/geojson");
                then.status(200).json_body(json!({"type": "FeatureCollection", "features": []}));
            })
            .await;

        let result = client(&server)
            .directions(TravelMode::Car, LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0))
            .await;

        assert!(matches!(result, Err(OrsError::InvalidGeometry(_))));
    }
}
