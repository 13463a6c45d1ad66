//! OpenRouteService client.
//!
//! Two endpoints are used:
//! - the duration matrix (`/v2/matrix/{profile}`), one request per mode
//!   with the origin prepended to the destination list;
//! - directions as GeoJSON (`/v2/directions/{profile}/geojson`) for the
//!   path to the fastest destination.
//!
//! Coordinates on the wire are always `[lng, lat]`.

mod client;
mod error;
mod types;

pub use client::{OrsClient, OrsConfig};
pub use error::OrsError;
pub use types::{
    DirectionsRequest, DirectionsResponse, MatrixRequest, MatrixResponse, RouteFeature,
    RouteGeometry,
};
