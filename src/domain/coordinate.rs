//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Captured once from the device and replaced wholesale if re-acquired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Builds a coordinate from a GeoJSON position (`[longitude, latitude]`).
    #[must_use]
    pub const fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    /// Returns the GeoJSON position (`[longitude, latitude]`).
    #[must_use]
    pub const fn to_lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Returns `true` when both components are finite and within range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geojson_order_is_longitude_first() {
        let c = Coordinate::from_lon_lat([20.0, 10.0]);
        assert_eq!(c.latitude, 10.0);
        assert_eq!(c.longitude, 20.0);
        assert_eq!(c.to_lon_lat(), [20.0, 10.0]);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(10.0, 20.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NAN).is_valid());
    }
}
