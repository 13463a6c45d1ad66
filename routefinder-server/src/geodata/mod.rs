//! Dataset loading: FlatGeobuf or GeoJSON, from a URL or a local path.

mod decode;
mod error;
mod layer;
mod loader;

pub use decode::{DataFormat, RawFeature, decode, detect_format};
pub use error::GeoDataError;
pub use layer::{Bounds, PointLayer, ZoneLayer};
pub use loader::{DataSource, GeoDataLoader};
