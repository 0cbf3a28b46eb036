//! Resolved distances and the published ranked view.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{Coordinate, Station};

/// Travel distance obtained from the external routing service.
///
/// Written only by the distance resolver. A station can never carry a
/// stale distance from a prior origin because the pairing lives in
/// [`ResolvedCandidate`], which is rebuilt wholesale each cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDistance {
    /// Human-readable distance, e.g. "2.3 mi".
    pub text: String,
    /// Numeric distance value, used for ordering.
    pub value: u32,
}

/// A candidate station paired with its resolved travel distance.
#[derive(Debug, Clone)]
pub struct ResolvedCandidate {
    pub station: Arc<Station>,
    pub distance: ResolvedDistance,
}

/// The distance-ordered result of one completed resolution cycle.
///
/// Every member carries a resolved distance by construction. Renderers
/// consume this read-only.
#[derive(Debug, Clone)]
pub struct RankedView {
    /// The origin this view was resolved against.
    pub origin: Coordinate,
    /// Stations ascending by travel distance.
    pub stations: Vec<ResolvedCandidate>,
    /// When the resolution completed.
    pub resolved_at: DateTime<Utc>,
}

impl RankedView {
    /// An empty view, for an origin with no stations in range.
    pub fn empty(origin: Coordinate) -> Self {
        Self {
            origin,
            stations: Vec::new(),
            resolved_at: Utc::now(),
        }
    }
}
