//! Repair station records.

use std::fmt;

use super::Coordinate;

/// Unique station identifier, the data source's `OBJECTID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bicycle repair station.
///
/// Built once at the ingestion boundary from the data source's GeoJSON
/// and never mutated; the pipeline only pairs a station with computed
/// distances, it does not write into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub coordinate: Coordinate,
    /// Free-text description from the source (`Description`).
    pub description: String,
    /// Station owner (`Owner`).
    pub owner: String,
    /// Path or URL of the station photo (`File_Path`), possibly empty.
    pub image_path: String,
}
