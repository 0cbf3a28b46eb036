//! Wire types for the distance matrix service.

use serde::Deserialize;

/// Travel mode submitted with each batched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Bicycling,
    Walking,
    Driving,
}

impl TravelMode {
    /// Wire value for the `mode` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Bicycling => "bicycling",
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
        }
    }
}

/// Unit system for the human-readable distance text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    /// Wire value for the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
        }
    }
}

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    pub status: String,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// One origin's results. A single-origin request yields a single row.
#[derive(Debug, Deserialize)]
pub struct MatrixRow {
    pub elements: Vec<MatrixElement>,
}

/// One origin-destination pairing.
///
/// Elements are aligned positionally with the submitted destinations.
#[derive(Debug, Deserialize)]
pub struct MatrixElement {
    pub status: String,
    #[serde(default)]
    pub distance: Option<DistanceDto>,
}

#[derive(Debug, Deserialize)]
pub struct DistanceDto {
    pub text: String,
    pub value: u32,
}
