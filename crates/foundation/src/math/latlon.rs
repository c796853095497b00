use std::fmt;

pub const MIN_LAT_DEG: f64 = -90.0;
pub const MAX_LAT_DEG: f64 = 90.0;
pub const MIN_LON_DEG: f64 = -180.0;
pub const MAX_LON_DEG: f64 = 180.0;

/// A validated geographic coordinate in degrees.
///
/// Construction rejects non-finite values and values outside
/// `[-90, 90]` x `[-180, 180]`, so every `LatLon` projects to a finite point.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LatLon {
    lat_deg: f64,
    lon_deg: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GeoError {
    LatitudeOutOfRange { lat_deg: f64 },
    LongitudeOutOfRange { lon_deg: f64 },
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::LatitudeOutOfRange { lat_deg } => {
                write!(f, "latitude {lat_deg} outside [{MIN_LAT_DEG}, {MAX_LAT_DEG}]")
            }
            GeoError::LongitudeOutOfRange { lon_deg } => {
                write!(f, "longitude {lon_deg} outside [{MIN_LON_DEG}, {MAX_LON_DEG}]")
            }
        }
    }
}

impl std::error::Error for GeoError {}

impl LatLon {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Result<Self, GeoError> {
        // NaN fails both range checks.
        if !(MIN_LAT_DEG..=MAX_LAT_DEG).contains(&lat_deg) {
            return Err(GeoError::LatitudeOutOfRange { lat_deg });
        }
        if !(MIN_LON_DEG..=MAX_LON_DEG).contains(&lon_deg) {
            return Err(GeoError::LongitudeOutOfRange { lon_deg });
        }
        Ok(Self { lat_deg, lon_deg })
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_deg
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_deg
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoError, LatLon};

    #[test]
    fn accepts_range_endpoints() {
        assert!(LatLon::new(90.0, 180.0).is_ok());
        assert!(LatLon::new(-90.0, -180.0).is_ok());
        assert_eq!(LatLon::default(), LatLon::new(0.0, 0.0).unwrap());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(
            LatLon::new(90.5, 0.0),
            Err(GeoError::LatitudeOutOfRange { lat_deg: 90.5 })
        );
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert_eq!(
            LatLon::new(0.0, -180.01),
            Err(GeoError::LongitudeOutOfRange { lon_deg: -180.01 })
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(LatLon::new(f64::NAN, 0.0).is_err());
        assert!(LatLon::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn error_message_names_the_value() {
        let err = LatLon::new(0.0, 200.0).unwrap_err();
        assert_eq!(err.to_string(), "longitude 200 outside [-180, 180]");
    }
}
