//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::error;

use crate::domain::Coordinate;
use crate::dropoffs::{FeatureCollection, to_collection};
use crate::finder::CycleOutcome;
use crate::matrix::MatrixError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the frontend assets directory; anything
/// not matched by an API route falls through to it.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/data/dropoffs", get(dropoffs))
        .route("/api/nearby", get(nearby))
        .route("/api/view", get(current_view))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Serve the full station set as a GeoJSON feature collection.
///
/// The frontend sends `centerLat`/`centerLng` query parameters; they are
/// accepted and ignored, and the full set is returned regardless.
async fn dropoffs(State(state): State<AppState>) -> Json<FeatureCollection> {
    let stations = state.stations.all().await;
    Json(to_collection(&stations))
}

/// Run a resolution cycle for a new origin and return the outcome.
///
/// Responds with the published state: `ready` with the ranked view when
/// this origin's cycle completed, or the newer cycle's state when this
/// one was superseded mid-flight.
async fn nearby(
    State(state): State<AppState>,
    Query(req): Query<NearbyRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let origin = Coordinate::new(req.lat, req.lng).map_err(|e| AppError::BadRequest {
        message: format!("Invalid origin: {e}. Select an address or enable your location."),
    })?;

    let stations = state.stations.all().await;

    match state.coordinator.relocate(origin, &stations).await? {
        CycleOutcome::Published(view) => Ok(Json(StateResponse {
            state: "ready",
            view: Some(ViewResult::from_view(&view)),
            message: None,
        })),
        // A newer origin arrived while this one was resolving; report
        // whatever is current rather than an error.
        CycleOutcome::Superseded => {
            let current = state.coordinator.current().await;
            Ok(Json(StateResponse::from_state(&current)))
        }
    }
}

/// The currently published view state.
async fn current_view(State(state): State<AppState>) -> Json<StateResponse> {
    let current = state.coordinator.current().await;
    Json(StateResponse::from_state(&current))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
}

impl From<MatrixError> for AppError {
    fn from(e: MatrixError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
