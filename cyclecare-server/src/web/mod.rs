//! Web layer for the repair station finder.
//!
//! Provides HTTP endpoints for the station data, origin changes and the
//! published ranked view, and serves the frontend assets.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
