use std::fmt;

use foundation::math::{GeoError, LatLon};
use serde::{Deserialize, Serialize};

/// Ground marker coordinate list: `{ "values": [ { "lat": .., "lon": .. }, .. ] }`.
///
/// Order is significant; the sweep visits markers by their position in
/// `values`. Entries stay raw JSON until [`MarkerDocument::entries`] so one
/// malformed entry does not sink the rest of the list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MarkerDocument {
    pub values: Vec<serde_json::Value>,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkerEntry {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug)]
pub enum MarkerDocumentError {
    Parse(serde_json::Error),
}

impl fmt::Display for MarkerDocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerDocumentError::Parse(err) => write!(f, "marker list parse error: {err}"),
        }
    }
}

impl std::error::Error for MarkerDocumentError {}

/// Why a single marker entry was not placed.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerEntryError {
    /// Not an object with numeric `lat` and `lon`.
    Malformed(String),
    OutOfRange(GeoError),
}

impl fmt::Display for MarkerEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerEntryError::Malformed(reason) => write!(f, "malformed entry: {reason}"),
            MarkerEntryError::OutOfRange(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for MarkerEntryError {}

impl From<GeoError> for MarkerEntryError {
    fn from(err: GeoError) -> Self {
        MarkerEntryError::OutOfRange(err)
    }
}

impl MarkerEntry {
    pub fn to_lat_lon(self) -> Result<LatLon, GeoError> {
        LatLon::new(self.lat, self.lon)
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self, MarkerEntryError> {
        MarkerEntry::deserialize(value).map_err(|e| MarkerEntryError::Malformed(e.to_string()))
    }
}

impl MarkerDocument {
    pub fn from_json_str(payload: &str) -> Result<Self, MarkerDocumentError> {
        serde_json::from_str(payload).map_err(MarkerDocumentError::Parse)
    }

    /// Each entry validated on its own, in document order.
    pub fn entries(&self) -> impl Iterator<Item = Result<LatLon, MarkerEntryError>> + '_ {
        self.values
            .iter()
            .map(|v| MarkerEntry::from_value(v).and_then(|e| e.to_lat_lon().map_err(MarkerEntryError::from)))
    }
}

#[cfg(test)]
mod tests {
    use super::{MarkerDocument, MarkerEntry, MarkerEntryError};
    use foundation::math::{GeoError, LatLon};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_values_in_order() {
        let doc = MarkerDocument::from_json_str(
            r#"{ "values": [ { "lat": 18.84, "lon": 8.76 }, { "lat": -33.9, "lon": 151.2 } ] }"#,
        )
        .unwrap();
        let coords: Vec<_> = doc.entries().map(Result::unwrap).collect();
        assert_eq!(
            coords,
            vec![
                LatLon::new(18.84, 8.76).unwrap(),
                LatLon::new(-33.9, 151.2).unwrap(),
            ]
        );
    }

    #[test]
    fn ignores_unknown_fields() {
        let doc = MarkerDocument::from_json_str(
            r#"{ "values": [ { "lat": 1, "lon": 2, "name": "x" } ], "source": "test" }"#,
        )
        .unwrap();
        assert_eq!(doc.entries().filter(Result::is_ok).count(), 1);
    }

    #[test]
    fn missing_values_is_an_error() {
        let err = MarkerDocument::from_json_str(r#"{ "points": [] }"#).unwrap_err();
        assert!(err.to_string().starts_with("marker list parse error"));
    }

    #[test]
    fn malformed_entries_fail_alone() {
        let doc = MarkerDocument::from_json_str(
            r#"{ "values": [
                { "lat": 1, "lon": 2 },
                { "lat": "x", "lon": 3 },
                { "lat": 4 },
                7,
                { "lat": 91, "lon": 0 },
                { "lat": 4, "lon": 5 }
            ] }"#,
        )
        .unwrap();
        let results: Vec<_> = doc.entries().collect();
        assert_eq!(results.len(), 6);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(MarkerEntryError::Malformed(_))));
        assert!(matches!(results[2], Err(MarkerEntryError::Malformed(_))));
        assert!(matches!(results[3], Err(MarkerEntryError::Malformed(_))));
        assert_eq!(
            results[4],
            Err(MarkerEntryError::OutOfRange(GeoError::LatitudeOutOfRange { lat_deg: 91.0 }))
        );
        assert_eq!(results[5], Ok(LatLon::new(4.0, 5.0).unwrap()));
    }

    #[test]
    fn entries_validate_into_lat_lon() {
        assert!(MarkerEntry { lat: 45.0, lon: 10.0 }.to_lat_lon().is_ok());
        assert!(MarkerEntry { lat: 95.0, lon: 10.0 }.to_lat_lon().is_err());
    }
}
