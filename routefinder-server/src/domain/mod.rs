//! Domain types for the route finder.
//!
//! Coordinates, transport modes and dataset records. Constructors that
//! validate input return [`DomainError`].

mod error;
mod feature;
mod location;
mod mode;

pub use error::DomainError;
pub use feature::{FeatureKind, Point, PointId, Zone};
pub use location::LatLng;
pub use mode::TravelMode;
