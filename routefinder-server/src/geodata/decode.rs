//! Format detection and decoding.
//!
//! Both formats decode into [`RawFeature`]s: a `geo` geometry plus the
//! optional `name` property. Validation against the expected dataset kind
//! happens later, in the layer constructors.

use std::io::Cursor;

use flatgeobuf::{FallibleStreamingIterator, FgbReader};
use geo::Geometry;
use geojson::GeoJson;
use geozero::{FeatureProperties, ToGeo};
use serde_json::Value as JsonValue;
use tracing::warn;

use super::error::GeoDataError;

/// FlatGeobuf magic bytes ("fgb" + major version 3).
const FGB_MAGIC: [u8; 4] = [0x66, 0x67, 0x62, 0x03];

/// Property holding the display name.
const NAME_PROPERTY: &str = "name";

/// Supported encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    FlatGeobuf,
    GeoJson,
}

/// A decoded feature before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeature {
    pub geometry: Geometry<f64>,
    pub name: Option<String>,
}

/// Pick the decoder from content, then extension, then content type.
pub fn detect_format(
    location: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<DataFormat, GeoDataError> {
    if bytes.starts_with(&FGB_MAGIC) {
        return Ok(DataFormat::FlatGeobuf);
    }

    let lower = location.to_ascii_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or_default();
    if path.ends_with(".fgb") {
        return Ok(DataFormat::FlatGeobuf);
    }
    if path.ends_with(".geojson") || path.ends_with(".json") {
        return Ok(DataFormat::GeoJson);
    }

    if content_type.is_some_and(|ct| ct.contains("json")) {
        return Ok(DataFormat::GeoJson);
    }

    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    if first == Some(&b'{') {
        return Ok(DataFormat::GeoJson);
    }

    Err(GeoDataError::UnsupportedFormat(location.to_string()))
}

/// Decode `bytes` in the given format.
pub fn decode(format: DataFormat, bytes: &[u8]) -> Result<Vec<RawFeature>, GeoDataError> {
    match format {
        DataFormat::FlatGeobuf => decode_flatgeobuf(bytes),
        DataFormat::GeoJson => decode_geojson(bytes),
    }
}

fn fgb_error(e: impl std::fmt::Display) -> GeoDataError {
    GeoDataError::Decode {
        format: "FlatGeobuf",
        message: e.to_string(),
    }
}

fn geojson_error(e: impl std::fmt::Display) -> GeoDataError {
    GeoDataError::Decode {
        format: "GeoJSON",
        message: e.to_string(),
    }
}

/// Stream every feature out of a FlatGeobuf buffer.
pub fn decode_flatgeobuf(bytes: &[u8]) -> Result<Vec<RawFeature>, GeoDataError> {
    if !bytes.starts_with(&FGB_MAGIC) {
        return Err(fgb_error("missing magic bytes"));
    }

    let mut cursor = Cursor::new(bytes);
    let mut features = FgbReader::open(&mut cursor)
        .map_err(fgb_error)?
        .select_all()
        .map_err(fgb_error)?;

    let mut decoded = Vec::new();
    while let Some(feature) = features.next().map_err(fgb_error)? {
        let geometry = feature.to_geo().map_err(fgb_error)?;
        let name = match feature.properties() {
            Ok(mut props) => props.remove(NAME_PROPERTY).filter(|n| !n.is_empty()),
            Err(e) => {
                warn!(feature = decoded.len(), error = %e, "unreadable FlatGeobuf properties");
                None
            }
        };
        decoded.push(RawFeature { geometry, name });
    }

    Ok(decoded)
}

/// Decode a FeatureCollection, a single Feature, or a bare Geometry.
pub fn decode_geojson(bytes: &[u8]) -> Result<Vec<RawFeature>, GeoDataError> {
    let text = std::str::from_utf8(bytes).map_err(geojson_error)?;
    let parsed: GeoJson = text.parse().map_err(geojson_error)?;

    let features = match parsed {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => {
            let geometry = Geometry::<f64>::try_from(geometry.value).map_err(geojson_error)?;
            return Ok(vec![RawFeature {
                geometry,
                name: None,
            }]);
        }
    };

    let mut decoded = Vec::with_capacity(features.len());
    for (idx, feature) in features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            warn!(feature = idx, "skipping GeoJSON feature without geometry");
            continue;
        };
        let geometry = Geometry::<f64>::try_from(geometry.value).map_err(geojson_error)?;
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get(NAME_PROPERTY))
            .and_then(name_from_json);
        decoded.push(RawFeature { geometry, name });
    }

    Ok(decoded)
}

/// Strings as-is, numbers and booleans stringified, anything else dropped.
fn name_from_json(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// GeoJSON-style type name of a geometry.
pub fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
