//! WGS84 coordinates used as search anchors and place locations.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A `(longitude, latitude)` pair in WGS84 degrees.
///
/// Out-of-region values are allowed; only the valid degree ranges are checked
/// by [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Builds a coordinate after checking `lon` is within `-180..=180` and
    /// `lat` within `-90..=90`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CoordinateOutOfRange`] for non-finite or
    /// out-of-range values.
    pub fn new(lon: f64, lat: f64) -> Result<Self, CoreError> {
        let coordinate = Self { lon, lat };
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(CoreError::CoordinateOutOfRange { lon, lat })
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_busan_city_hall() {
        let c = Coordinate::new(129.0756, 35.1796).expect("valid coordinate");
        assert!((c.lon - 129.0756).abs() < f64::EPSILON);
        assert!((c.lat - 35.1796).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_latitude_past_pole() {
        let err = Coordinate::new(129.0, 91.0).unwrap_err();
        assert!(matches!(err, CoreError::CoordinateOutOfRange { .. }));
    }

    #[test]
    fn rejects_nan() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn display_uses_lon_lat_order() {
        let c = Coordinate { lon: 1.5, lat: -2.25 };
        assert_eq!(c.to_string(), "(1.500000, -2.250000)");
    }
}
