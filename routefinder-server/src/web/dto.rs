//! Data transfer objects for web requests and responses.

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

use crate::domain::FeatureKind;
use crate::geodata::{Bounds, GeoDataError, PointLayer, ZoneLayer};

/// Request to switch the active dataset.
#[derive(Debug, Deserialize)]
pub struct SelectDatasetRequest {
    /// Catalog key
    pub key: String,
}

/// Layers of a freshly selected dataset.
///
/// A layer that failed to load is `null` and has an entry in `errors`.
#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub key: String,
    pub label: String,

    /// Zone boundary for the map
    pub zone: Option<FeatureCollection>,

    /// Base points for the map
    pub points: Option<FeatureCollection>,

    /// Area to fit the map to
    pub bounds: Option<Bounds>,

    pub errors: Vec<LayerError>,
}

/// Why one layer of a dataset did not load.
#[derive(Debug, Serialize)]
pub struct LayerError {
    pub layer: FeatureKind,
    pub error: String,
}

impl LayerError {
    pub fn new(layer: FeatureKind, error: &GeoDataError) -> Self {
        Self {
            layer,
            error: error.to_string(),
        }
    }
}

impl DatasetResponse {
    pub fn new(
        key: String,
        label: String,
        zone: Option<&ZoneLayer>,
        points: Option<&PointLayer>,
        errors: Vec<LayerError>,
    ) -> Self {
        Self {
            key,
            label,
            zone: zone.map(ZoneLayer::to_geojson),
            points: points.map(PointLayer::to_geojson),
            bounds: zone.and_then(ZoneLayer::bounds),
            errors,
        }
    }
}

/// A map click.
#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodata::RawFeature;
    use geo::{Geometry, point, polygon};

    #[test]
    fn dataset_response_shape() {
        let zone = ZoneLayer::from_features(
            "zone",
            vec![RawFeature {
                geometry: Geometry::Polygon(polygon![
                    (x: 2.0, y: 48.0),
                    (x: 3.0, y: 48.0),
                    (x: 3.0, y: 49.0),
                    (x: 2.0, y: 48.0),
                ]),
                name: Some("Secteur".into()),
            }],
        )
        .unwrap();
        let points = PointLayer::from_features(
            "points",
            vec![RawFeature {
                geometry: Geometry::Point(point!(x: 2.5, y: 48.5)),
                name: None,
            }],
        )
        .unwrap();

        let response = DatasetResponse::new(
            "paris".into(),
            "Paris - Casernes".into(),
            Some(&zone),
            Some(&points),
            Vec::new(),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["key"], "paris");
        assert_eq!(json["zone"]["type"], "FeatureCollection");
        assert_eq!(json["points"]["features"].as_array().unwrap().len(), 1);
        assert_eq!(json["bounds"]["south_west"]["lat"], 48.0);
        assert_eq!(json["bounds"]["north_east"]["lng"], 3.0);
        assert_eq!(json["errors"], serde_json::json!([]));
    }

    #[test]
    fn missing_layer_is_null_with_error() {
        let points = PointLayer::from_features(
            "points",
            vec![RawFeature {
                geometry: Geometry::Point(point!(x: 2.5, y: 48.5)),
                name: None,
            }],
        )
        .unwrap();
        let err = GeoDataError::Empty("zone.fgb".into());

        let response = DatasetResponse::new(
            "absent".into(),
            "Absent".into(),
            None,
            Some(&points),
            vec![LayerError::new(FeatureKind::Zone, &err)],
        );
        let json = serde_json::to_value(&response).unwrap();

        assert!(json["zone"].is_null());
        assert!(json["bounds"].is_null());
        assert_eq!(json["points"]["features"].as_array().unwrap().len(), 1);
        assert_eq!(json["errors"][0]["layer"], "zone");
        assert_eq!(json["errors"][0]["error"], err.to_string());
    }

    #[test]
    fn click_request_parses() {
        let req: ClickRequest = serde_json::from_str(r#"{"lat": 48.85, "lng": 2.35}"#).unwrap();
        assert_eq!(req.lat, 48.85);
        assert_eq!(req.lng, 2.35);
    }
}
