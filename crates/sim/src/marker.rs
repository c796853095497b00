use formats::MarkerEntryError;
use foundation::math::LatLon;
use scene::entity::EntityId;

/// A ground marker placed on the globe.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoMarker {
    /// Position in the sweep order.
    pub index: usize,
    pub coord: LatLon,
    pub entity: EntityId,
    pub visited: bool,
}

/// A coordinate that was dropped instead of placed.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRejection {
    /// Position in the input sequence it came from.
    pub source_index: usize,
    pub error: MarkerEntryError,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerLoadReport {
    pub accepted: usize,
    pub rejected: Vec<MarkerRejection>,
}
