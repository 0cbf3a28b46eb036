use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cyclecare_server::domain::Coordinate;
use cyclecare_server::dropoffs::{
    DropoffClient, DropoffClientConfig, DropoffSource, StationIndex,
};
use cyclecare_server::finder::{Coordinator, FinderConfig};
use cyclecare_server::matrix::{DistanceMatrix, MatrixClient, MatrixConfig, MockMatrixClient};
use cyclecare_server::web::{AppState, create_router};

/// How often to re-read the station source (6 hours). The set changes
/// rarely; a failed refresh keeps the previous set.
const STATION_REFRESH_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

/// Downtown Madison; sent to remote sources that want a center point.
const DEFAULT_CENTER: (f64, f64) = (43.0722, -89.4008);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Pick the distance provider. Without a key, fall back to the mock
    // client so the app still runs end-to-end in development.
    let matrix: Arc<dyn DistanceMatrix> = match std::env::var("MAPS_API_KEY") {
        Ok(key) if !key.is_empty() => {
            let config = MatrixConfig::new(key);
            let client =
                MatrixClient::new(config).expect("Failed to create distance matrix client");
            Arc::new(client)
        }
        _ => {
            warn!("MAPS_API_KEY not set; using great-circle mock distances");
            Arc::new(MockMatrixClient)
        }
    };

    // Station source: a remote endpoint if configured, otherwise a local
    // GeoJSON data directory.
    let source = match std::env::var("DROPOFFS_URL") {
        Ok(url) if !url.is_empty() => {
            let config = DropoffClientConfig::new(url);
            let client = DropoffClient::new(config).expect("Failed to create dropoff client");
            let center = Coordinate::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1)
                .expect("Default center is a valid coordinate");
            DropoffSource::Remote { client, center }
        }
        _ => {
            let dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
            DropoffSource::Directory(dir.into())
        }
    };

    // Load the station set up front; a server with nothing to serve
    // should fail fast.
    let stations = StationIndex::fetch(source)
        .await
        .expect("Failed to load station data");
    info!(count = stations.len().await, "loaded station set");

    // Refresh the station set in the background.
    let refresh_index = stations.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATION_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresh_index.refresh().await {
                Ok(count) => info!(count, "refreshed station set"),
                Err(e) => error!(error = %e, "failed to refresh station set"),
            }
        }
    });

    let coordinator = Coordinator::new(matrix, FinderConfig::default());
    let state = AppState::new(stations, coordinator);

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
    let app = create_router(state, &static_dir);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "repair station finder listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
