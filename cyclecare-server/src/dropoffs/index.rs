//! In-memory station index.
//!
//! The station set changes rarely, so it is loaded once at startup and
//! refreshed in the background, mirroring how the original data server
//! caches its GeoJSON files instead of re-reading them per request.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Coordinate, Station};

use super::client::DropoffClient;
use super::error::DropoffError;
use super::types::{FeatureCollection, into_stations};

/// Where the station set comes from.
pub enum DropoffSource {
    /// A remote server exposing `/data/dropoffs`.
    Remote {
        client: DropoffClient,
        center: Coordinate,
    },
    /// A local directory of GeoJSON files.
    Directory(PathBuf),
}

impl DropoffSource {
    /// Fetch the full station set from this source.
    pub async fn fetch_all(&self) -> Result<Vec<Arc<Station>>, DropoffError> {
        match self {
            DropoffSource::Remote { client, center } => client.fetch(*center).await,
            DropoffSource::Directory(dir) => load_dir(dir),
        }
    }
}

/// Thread-safe station set with support for background refresh.
#[derive(Clone)]
pub struct StationIndex {
    inner: Arc<RwLock<Vec<Arc<Station>>>>,
    source: Arc<DropoffSource>,
}

impl StationIndex {
    /// Create a new index by loading the full station set.
    ///
    /// Fails if the source is unreachable or holds no data.
    pub async fn fetch(source: DropoffSource) -> Result<Self, DropoffError> {
        let stations = source.fetch_all().await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(stations)),
            source: Arc::new(source),
        })
    }

    /// Snapshot of the current station set.
    pub async fn all(&self) -> Vec<Arc<Station>> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Number of stations in the index.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// Check whether the index is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Re-read the source.
    ///
    /// On success, replaces the current set. On failure, the existing
    /// set is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, DropoffError> {
        let stations = self.source.fetch_all().await?;
        let count = stations.len();

        let mut guard = self.inner.write().await;
        *guard = stations;

        Ok(count)
    }
}

/// Load every GeoJSON file under `dir`, in filename order.
fn load_dir(dir: &Path) -> Result<Vec<Arc<Station>>, DropoffError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && matches!(
                    path.extension().and_then(|s| s.to_str()),
                    Some("geojson") | Some("json")
                )
        })
        .collect();

    // Deterministic load order regardless of directory iteration order.
    paths.sort();

    if paths.is_empty() {
        return Err(DropoffError::NoData {
            dir: dir.display().to_string(),
        });
    }

    let mut stations = Vec::new();
    for path in paths {
        let json = std::fs::read_to_string(&path)?;

        let collection: FeatureCollection =
            serde_json::from_str(&json).map_err(|e| DropoffError::Json {
                message: format!("{}: {}", path.display(), e),
            })?;

        stations.extend(into_stations(collection));
    }

    Ok(stations)
}
