//! Validated dataset layers.

use std::sync::Arc;

use geo::{BoundingRect, Geometry, MultiPolygon, Rect};
use geojson::{Feature, FeatureCollection, JsonObject};
use serde::Serialize;

use crate::domain::{FeatureKind, LatLng, Point, PointId, Zone};

use super::decode::{RawFeature, geometry_type_name};
use super::error::GeoDataError;

/// Geographic bounding box, in the order Leaflet's `fitBounds` expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            south_west: LatLng::new(rect.min().y, rect.min().x),
            north_east: LatLng::new(rect.max().y, rect.max().x),
        }
    }
}

/// Check that every feature is of an accepted geometry type.
fn validate(kind: FeatureKind, features: &[RawFeature]) -> Result<(), GeoDataError> {
    let accepted = kind.accepted_geometries();
    let mut found: Vec<String> = Vec::new();
    for feature in features {
        let name = geometry_type_name(&feature.geometry);
        if !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    }

    if found.iter().all(|f| accepted.contains(&f.as_str())) {
        Ok(())
    } else {
        Err(GeoDataError::GeometryMismatch {
            expected: kind,
            found,
        })
    }
}

fn feature(geometry: geojson::Geometry, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn name_properties(kind: FeatureKind, name: Option<&str>) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert("kind".to_string(), kind.to_string().into());
    props.insert("label".to_string(), kind.popup_label().into());
    if let Some(name) = name {
        props.insert("name".to_string(), name.into());
    }
    props
}

/// The active set of points of interest.
#[derive(Debug, Clone)]
pub struct PointLayer {
    source: String,
    points: Arc<[Point]>,
}

impl PointLayer {
    /// Build from decoded features. MultiPoints expand to one point per member.
    pub fn from_features(
        source: impl Into<String>,
        features: Vec<RawFeature>,
    ) -> Result<Self, GeoDataError> {
        let source = source.into();
        if features.is_empty() {
            return Err(GeoDataError::Empty(source));
        }
        validate(FeatureKind::Points, &features)?;

        let mut points = Vec::with_capacity(features.len());
        for feature in features {
            let members = match feature.geometry {
                Geometry::Point(p) => vec![p],
                Geometry::MultiPoint(mp) => mp.0,
                _ => Vec::new(),
            };
            for member in members {
                let id = PointId(points.len() as u32);
                points.push(Point::new(id, LatLng::from(member), feature.name.clone()));
            }
        }

        if points.is_empty() {
            return Err(GeoDataError::Empty(source));
        }

        Ok(Self {
            source,
            points: points.into(),
        })
    }

    /// Where the layer was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Shared handle to the points, for work that outlives a borrow.
    pub fn shared_points(&self) -> Arc<[Point]> {
        Arc::clone(&self.points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// GeoJSON for the client map. Each feature carries `id`, `kind` and `name`.
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .points
            .iter()
            .map(|p| {
                let mut props = name_properties(FeatureKind::Points, p.name.as_deref());
                props.insert("id".to_string(), p.id.0.into());
                let point = geo::Point::from(p.location);
                feature(geojson::Geometry::new(geojson::Value::from(&point)), props)
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

/// The active zone boundary.
#[derive(Debug, Clone)]
pub struct ZoneLayer {
    source: String,
    zones: Vec<Zone>,
    bounds: Option<Bounds>,
}

impl ZoneLayer {
    /// Build from decoded features. Polygons are widened to MultiPolygons.
    pub fn from_features(
        source: impl Into<String>,
        features: Vec<RawFeature>,
    ) -> Result<Self, GeoDataError> {
        let source = source.into();
        if features.is_empty() {
            return Err(GeoDataError::Empty(source));
        }
        validate(FeatureKind::Zone, &features)?;

        let zones: Vec<Zone> = features
            .into_iter()
            .filter_map(|feature| {
                let boundary = match feature.geometry {
                    Geometry::Polygon(p) => MultiPolygon(vec![p]),
                    Geometry::MultiPolygon(mp) => mp,
                    _ => return None,
                };
                Some(Zone {
                    boundary,
                    name: feature.name,
                })
            })
            .collect();

        let bounds = zones
            .iter()
            .filter_map(|z| z.boundary.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    geo::coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                    geo::coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
                )
            })
            .map(Bounds::from);

        Ok(Self {
            source,
            zones,
            bounds,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Bounding box of every zone, if any zone is non-empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// GeoJSON for the client map.
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .zones
            .iter()
            .map(|z| {
                let props = name_properties(FeatureKind::Zone, z.name.as_deref());
                feature(
                    geojson::Geometry::new(geojson::Value::from(&z.boundary)),
                    props,
                )
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
