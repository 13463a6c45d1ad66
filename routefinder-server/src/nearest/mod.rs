//! Nearest point selection.
//!
//! A linear scan over the loaded points followed by a stable sort on
//! great-circle distance. There is no spatial index: datasets are expected
//! to hold at most a few hundred points.

use crate::domain::{LatLng, Point};

/// Number of candidates handed to the travel time resolver.
pub const DEFAULT_K: usize = 10;

/// A point together with its distance from the query location.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPoint<'a> {
    pub point: &'a Point,
    pub distance_m: f64,
}

/// Return the `k` points closest to `query`, nearest first.
///
/// Ties keep their dataset order. Fewer than `k` points yields all of them;
/// an empty slice yields an empty result.
pub fn nearest_points<'a>(query: LatLng, points: &'a [Point], k: usize) -> Vec<RankedPoint<'a>> {
    let mut ranked: Vec<RankedPoint<'a>> = points
        .iter()
        .map(|point| RankedPoint {
            point,
            distance_m: query.distance_to(&point.location),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    ranked.truncate(k);
    ranked
}
