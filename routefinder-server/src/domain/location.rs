//! Geographic coordinates.

use std::fmt;
use std::hash::{Hash, Hasher};

use geo::{Distance, Haversine, Point as GeoPoint};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A WGS84 position in degrees.
///
/// Stored in map order (latitude first). The routing API speaks
/// `[lng, lat]`; use [`LatLng::to_lng_lat`] and [`LatLng::from_lng_lat`]
/// at that boundary.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Create a position without validation.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a position, rejecting non-finite or out-of-range values.
    ///
    /// # Examples
    ///
    /// ```
    /// use routefinder_server::domain::LatLng;
    ///
    /// assert!(LatLng::parse(48.85, 2.35).is_ok());
    /// assert!(LatLng::parse(91.0, 0.0).is_err());
    /// assert!(LatLng::parse(f64::NAN, 0.0).is_err());
    /// ```
    pub fn parse(lat: f64, lng: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(DomainError::InvalidCoordinate("must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinate("latitude out of range"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::InvalidCoordinate("longitude out of range"));
        }
        Ok(Self { lat, lng })
    }

    /// Wire order used by the routing API.
    pub fn to_lng_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Build from a `[lng, lat]` pair as returned by the routing API.
    pub fn from_lng_lat(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[1],
            lng: pair[0],
        }
    }

    /// Great-circle distance in metres.
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        Haversine::distance(GeoPoint::from(*self), GeoPoint::from(*other))
    }
}

impl From<LatLng> for GeoPoint<f64> {
    fn from(value: LatLng) -> Self {
        GeoPoint::new(value.lng, value.lat)
    }
}

impl From<GeoPoint<f64>> for LatLng {
    fn from(value: GeoPoint<f64>) -> Self {
        LatLng::new(value.y(), value.x())
    }
}

// Bitwise equality so that `Eq` and `Hash` agree; used in cache keys.
impl PartialEq for LatLng {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lng.to_bits() == other.lng.to_bits()
    }
}

impl Eq for LatLng {}

impl Hash for LatLng {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lng.to_bits().hash(state);
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lng_lat_roundtrip_swaps_order() {
        let p = LatLng::new(45.0, 5.0);
        assert_eq!(p.to_lng_lat(), [5.0, 45.0]);
        assert_eq!(LatLng::from_lng_lat([5.0, 45.0]), p);
    }

    #[test]
    fn distance_one_degree_on_equator() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 1.0);
        let d = a.distance_to(&b);
        // ~111.2 km with the mean earth radius
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = LatLng::new(48.85, 2.35);
        let b = LatLng::new(45.76, 4.83);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-6);
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!(LatLng::parse(0.0, 181.0).is_err());
        assert!(LatLng::parse(-90.5, 0.0).is_err());
        assert!(LatLng::parse(0.0, f64::INFINITY).is_err());
        assert!(LatLng::parse(-90.0, 180.0).is_ok());
    }

    #[test]
    fn equality_is_bitwise() {
        assert_eq!(LatLng::new(1.0, 2.0), LatLng::new(1.0, 2.0));
        assert_ne!(LatLng::new(0.0, 0.0), LatLng::new(-0.0, 0.0));
    }
}
