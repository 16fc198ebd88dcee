//! Approximate store proximity.
//!
//! Distances use a flat-earth approximation with fixed miles-per-degree
//! factors instead of great-circle math. Displayed distances depend on these
//! exact constants, so changing them changes what clients see.

use tracing::debug;

use super::{dto::NearbyStore, repo::Store};
use crate::rounding::round_to;

pub const MILES_PER_DEGREE_LAT: f64 = 69.0;
pub const MILES_PER_DEGREE_LON: f64 = 55.0;
pub const DEFAULT_RADIUS_MILES: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coordinate window used to discard far candidates before measuring.
/// Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn around(center: Coordinate, radius_miles: f64) -> Self {
        let lat_range = radius_miles / MILES_PER_DEGREE_LAT;
        let lon_range = radius_miles / MILES_PER_DEGREE_LON;
        Self {
            min_latitude: center.latitude - lat_range,
            max_latitude: center.latitude + lat_range,
            min_longitude: center.longitude - lon_range,
            max_longitude: center.longitude + lon_range,
        }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}

/// Planar distance in miles between two coordinates.
pub fn approximate_distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat_diff = (a.latitude - b.latitude).abs() * MILES_PER_DEGREE_LAT;
    let lon_diff = (a.longitude - b.longitude).abs() * MILES_PER_DEGREE_LON;
    (lat_diff * lat_diff + lon_diff * lon_diff).sqrt()
}

/// Stores within `radius_miles` of `origin`, nearest first.
///
/// Stores missing either coordinate never match. The radius is inclusive and
/// distances are rounded to two decimals after filtering and sorting.
pub fn rank_nearby(origin: Coordinate, radius_miles: f64, stores: Vec<Store>) -> Vec<NearbyStore> {
    let bounds = BoundingBox::around(origin, radius_miles);
    let candidates = stores.len();

    let mut ranked: Vec<(f64, Store)> = stores
        .into_iter()
        .filter_map(|store| {
            let position = store.coordinate()?;
            if !bounds.contains(position) {
                return None;
            }
            let distance = approximate_distance_miles(position, origin);
            (distance <= radius_miles).then_some((distance, store))
        })
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    debug!(candidates, matched = ranked.len(), radius_miles, "nearby stores ranked");

    ranked
        .into_iter()
        .map(|(distance, store)| NearbyStore {
            store,
            distance_miles: round_to(distance, 2),
        })
        .collect()
}
