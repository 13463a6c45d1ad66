//! Loaded dataset records.

use std::fmt;

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

use super::location::LatLng;

/// Stable identifier of a point within its dataset.
///
/// Assigned in decode order; valid until the dataset is replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u32);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point of interest.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Point {
    pub id: PointId,
    pub location: LatLng,
    pub name: Option<String>,
}

impl Point {
    pub fn new(id: PointId, location: LatLng, name: Option<String>) -> Self {
        Self { id, location, name }
    }

    /// Name for display, falling back to the id.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// A zone boundary. Display only; never used in computation.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub boundary: MultiPolygon<f64>,
    pub name: Option<String>,
}

/// Which kind of dataset a source is expected to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Polygon or MultiPolygon features.
    Zone,
    /// Point or MultiPoint features.
    Points,
}

impl FeatureKind {
    /// Geometry type names accepted for this kind.
    pub fn accepted_geometries(self) -> &'static [&'static str] {
        match self {
            FeatureKind::Zone => &["Polygon", "MultiPolygon"],
            FeatureKind::Points => &["Point", "MultiPoint"],
        }
    }

    /// Label used in popups ("Zone" / "Point").
    pub fn popup_label(self) -> &'static str {
        match self {
            FeatureKind::Zone => "Zone",
            FeatureKind::Points => "Point",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Zone => f.write_str("zone"),
            FeatureKind::Points => f.write_str("points"),
        }
    }
}
