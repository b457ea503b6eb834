//! Geographic coordinates for zone origins

use serde::{Deserialize, Serialize};
use std::fmt;

use super::units::Meters;

/// Mean Earth radius (IUGG), meters
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// WGS84 latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point. No range check; see [`GeoPoint::is_valid_latitude`].
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude is finite and within [-90, 90]
    pub fn is_valid_latitude(&self) -> bool {
        self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude)
    }

    /// Longitude is finite and within [-180, 180]
    pub fn is_valid_longitude(&self) -> bool {
        self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to `other` using the haversine formula
    pub fn haversine_distance(&self, other: &GeoPoint) -> Meters {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        // Rounding can push `a` a hair past 1.0 for antipodal points
        let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

        Meters::new(EARTH_MEAN_RADIUS_M * c)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}
