use serde::{Deserialize, Serialize};

use super::{
    proximity::{Coordinate, DEFAULT_RADIUS_MILES},
    repo::{NewStore, Store},
};
use crate::error::AppError;

pub const MAX_STORE_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct ListStoresQuery {
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    20
}

impl ListStoresQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=MAX_STORE_LIMIT).contains(&self.limit) {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {MAX_STORE_LIMIT}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius")]
    pub radius_miles: f64,
}
fn default_radius() -> f64 {
    DEFAULT_RADIUS_MILES
}

impl NearbyQuery {
    /// Checks the query point and radius before any ranking happens.
    pub fn validate(&self) -> Result<Coordinate, AppError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AppError::InvalidInput(
                "latitude must be between -90 and 90".into(),
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AppError::InvalidInput(
                "longitude must be between -180 and 180".into(),
            ));
        }
        if !self.radius_miles.is_finite() || self.radius_miles <= 0.0 {
            return Err(AppError::InvalidInput(
                "radius_miles must be positive".into(),
            ));
        }
        Ok(Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

/// A store together with its approximate distance from the query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStore {
    #[serde(flatten)]
    pub store: Store,
    pub distance_miles: f64,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: &'static str,
    pub count: i64,
}

pub const SEED_STORES: &[NewStore] = &[
    NewStore {
        name: "Whole Foods Market",
        address: "123 Market St, San Francisco, CA",
        latitude: 37.7749,
        longitude: -122.4194,
    },
    NewStore {
        name: "Trader Joe's",
        address: "456 Valencia St, San Francisco, CA",
        latitude: 37.7649,
        longitude: -122.4214,
    },
    NewStore {
        name: "Safeway",
        address: "789 Mission St, San Francisco, CA",
        latitude: 37.7849,
        longitude: -122.4094,
    },
    NewStore {
        name: "Sprouts Farmers Market",
        address: "321 Folsom St, San Francisco, CA",
        latitude: 37.7869,
        longitude: -122.3914,
    },
    NewStore {
        name: "Costco",
        address: "555 S Van Ness Ave, San Francisco, CA",
        latitude: 37.7609,
        longitude: -122.4174,
    },
];
