//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{RankedView, ResolvedCandidate};
use crate::finder::ViewState;

/// Request to rank stations around a new origin.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    /// Origin latitude in degrees
    pub lat: f64,

    /// Origin longitude in degrees
    pub lng: f64,
}

/// One ranked station.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Source object id
    pub id: u64,

    /// Station latitude in degrees
    pub lat: f64,

    /// Station longitude in degrees
    pub lng: f64,

    /// Human-readable location description
    pub description: String,

    /// Owning organisation
    pub owner: String,

    /// Photo URL, if the source has one
    pub image_path: String,

    /// Display distance as the service formatted it (e.g. "1.2 mi")
    pub distance_text: String,

    /// Numeric distance in the service's base unit, for ordering
    pub distance_value: u32,
}

impl StationResult {
    pub fn from_candidate(candidate: &ResolvedCandidate) -> Self {
        Self {
            id: candidate.station.id.0,
            lat: candidate.station.coordinate.lat(),
            lng: candidate.station.coordinate.lng(),
            description: candidate.station.description.clone(),
            owner: candidate.station.owner.clone(),
            image_path: candidate.station.image_path.clone(),
            distance_text: candidate.distance.text.clone(),
            distance_value: candidate.distance.value,
        }
    }
}

/// A published ranked view.
#[derive(Debug, Serialize)]
pub struct ViewResult {
    /// The origin this view was resolved for
    pub origin_lat: f64,
    pub origin_lng: f64,

    /// Stations ascending by travel distance
    pub stations: Vec<StationResult>,

    /// When the view was published (RFC 3339)
    pub resolved_at: String,
}

impl ViewResult {
    pub fn from_view(view: &RankedView) -> Self {
        Self {
            origin_lat: view.origin.lat(),
            origin_lng: view.origin.lng(),
            stations: view.stations.iter().map(StationResult::from_candidate).collect(),
            resolved_at: view.resolved_at.to_rfc3339(),
        }
    }
}

/// Current pipeline state as seen by renderers.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// One of "idle", "resolving", "ready", "failed"
    pub state: &'static str,

    /// The ranked view, present only when ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewResult>,

    /// Failure detail, present only when failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StateResponse {
    pub fn from_state(state: &ViewState) -> Self {
        match state {
            ViewState::Idle => Self {
                state: "idle",
                view: None,
                message: None,
            },
            ViewState::Resolving { .. } => Self {
                state: "resolving",
                view: None,
                message: None,
            },
            ViewState::Ready(view) => Self {
                state: "ready",
                view: Some(ViewResult::from_view(view)),
                message: None,
            },
            ViewState::Failed { message } => Self {
                state: "failed",
                view: None,
                message: Some(message.clone()),
            },
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
