//! Routing API request and response DTOs.
//!
//! Responses use `Option` for every field the core depends on so that a
//! missing payload is reported as a typed error rather than a parse failure.

use serde::{Deserialize, Serialize};

/// Body of a matrix request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRequest {
    /// Origin first, then destinations, each `[lng, lat]`.
    pub locations: Vec<[f64; 2]>,
    pub metrics: Vec<&'static str>,
    pub units: &'static str,
}

impl MatrixRequest {
    /// Durations from `origin` to every destination.
    pub fn durations_from(origin: [f64; 2], destinations: &[[f64; 2]]) -> Self {
        let mut locations = Vec::with_capacity(destinations.len() + 1);
        locations.push(origin);
        locations.extend_from_slice(destinations);
        Self {
            locations,
            metrics: vec!["duration"],
            units: "m",
        }
    }
}

/// Matrix response. Only durations are requested.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixResponse {
    /// `durations[i][j]` is seconds from location i to location j;
    /// `null` when no route exists.
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl MatrixResponse {
    /// Row 0 without the origin-to-origin entry.
    pub fn origin_row(self) -> Option<Vec<Option<f64>>> {
        let mut rows = self.durations?;
        if rows.is_empty() {
            return None;
        }
        let row = rows.swap_remove(0);
        Some(row.into_iter().skip(1).collect())
    }
}

/// Body of a directions request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsRequest {
    pub coordinates: Vec<[f64; 2]>,
}

/// Directions response in GeoJSON form.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub features: Option<Vec<RouteFeature>>,
}

/// One route feature.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteFeature {
    pub geometry: Option<RouteGeometry>,
}

/// LineString geometry. Positions may carry a third (elevation) value.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteGeometry {
    pub coordinates: Vec<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_request_prepends_origin() {
        let req = MatrixRequest::durations_from([2.0, 1.0], &[[4.0, 3.0], [6.0, 5.0]]);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "locations": [[2.0, 1.0], [4.0, 3.0], [6.0, 5.0]],
                "metrics": ["duration"],
                "units": "m"
            })
        );
    }

    #[test]
    fn origin_row_drops_self_entry() {
        let resp: MatrixResponse = serde_json::from_str(
            r#"{"durations": [[0.0, 120.5, null], [118.0, 0.0, 30.0], [null, 31.0, 0.0]]}"#,
        )
        .unwrap();
        assert_eq!(resp.origin_row(), Some(vec![Some(120.5), None]));
    }

    #[test]
    fn origin_row_missing_or_empty() {
        let resp: MatrixResponse = serde_json::from_str(r#"{"metadata": {}}"#).unwrap();
        assert!(resp.origin_row().is_none());

        let resp: MatrixResponse = serde_json::from_str(r#"{"durations": []}"#).unwrap();
        assert!(resp.origin_row().is_none());
    }

    #[test]
    fn directions_response_parses_geojson() {
        let resp: DirectionsResponse = serde_json::from_str(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {}, "geometry": {
                    "type": "LineString", "coordinates": [[2.35, 48.85], [2.36, 48.86, 35.0]]
                }}
            ]}"#,
        )
        .unwrap();
        let geometry = resp.features.unwrap()[0].geometry.clone().unwrap();
        assert_eq!(geometry.coordinates.len(), 2);
        assert_eq!(geometry.coordinates[1], vec![2.36, 48.86, 35.0]);
    }
}
