//! Application state for the web layer.

use std::sync::Arc;

use crate::dropoffs::StationIndex;
use crate::finder::Coordinator;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory station set
    pub stations: StationIndex,

    /// Sequences resolution cycles and holds the published view
    pub coordinator: Arc<Coordinator>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(stations: StationIndex, coordinator: Coordinator) -> Self {
        Self {
            stations,
            coordinator: Arc::new(coordinator),
        }
    }
}
