//! Distance matrix HTTP client.
//!
//! Issues one outbound request per resolution cycle and translates the
//! service's statuses into typed errors. Any non-success status fails
//! the entire batch; partial results are not modeled, and no retry or
//! caching happens at this layer.

use futures::future::BoxFuture;

use crate::domain::{Coordinate, ResolvedDistance};

use super::DistanceMatrix;
use super::error::MatrixError;
use super::types::{MatrixResponse, TravelMode, UnitSystem};

/// Default base URL for the distance matrix service.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Default request timeout in seconds. A timed-out call is treated the
/// same as any other failed batch.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the matrix client.
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// API key passed as the `key` query parameter
    pub api_key: String,
    /// Base URL for the service (defaults to production)
    pub base_url: String,
    /// Travel mode submitted with every request
    pub mode: TravelMode,
    /// Unit system for the human-readable distance text
    pub units: UnitSystem,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MatrixConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: TravelMode::default(),
            units: UnitSystem::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the travel mode.
    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the unit system.
    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP client for the travel-distance service.
#[derive(Debug, Clone)]
pub struct MatrixClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    mode: TravelMode,
    units: UnitSystem,
}

impl MatrixClient {
    /// Create a new matrix client with the given configuration.
    pub fn new(config: MatrixConfig) -> Result<Self, MatrixError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            mode: config.mode,
            units: config.units,
        })
    }

    /// Fetch travel distances for the destinations, in order.
    ///
    /// Destinations are joined `|`-separated into a single batched
    /// request. The element count is validated against the request
    /// before anything is returned, so a truncated or padded response
    /// fails fast instead of being silently misaligned.
    pub async fn fetch_distances(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<ResolvedDistance>, MatrixError> {
        let url = format!("{}/maps/api/distancematrix/json", self.base_url);

        let dests = destinations
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("|");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("origins", origin.to_string()),
                ("destinations", dests),
                ("mode", self.mode.as_str().to_string()),
                ("units", self.units.as_str().to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MatrixError::Api {
                status: status.as_u16().to_string(),
                message: Some(body),
            });
        }

        let body = response.text().await?;

        let parsed: MatrixResponse = serde_json::from_str(&body).map_err(|e| MatrixError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        match parsed.status.as_str() {
            "OK" => {}
            "OVER_QUERY_LIMIT" => return Err(MatrixError::RateLimited),
            "REQUEST_DENIED" => return Err(MatrixError::Denied),
            other => {
                return Err(MatrixError::Api {
                    status: other.to_string(),
                    message: parsed.error_message,
                });
            }
        }

        let row = parsed.rows.into_iter().next().ok_or_else(|| MatrixError::Json {
            message: "response contained no rows".to_string(),
            body: None,
        })?;

        if row.elements.len() != destinations.len() {
            return Err(MatrixError::LengthMismatch {
                requested: destinations.len(),
                returned: row.elements.len(),
            });
        }

        row.elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                if element.status != "OK" {
                    return Err(MatrixError::Element {
                        index,
                        status: element.status,
                    });
                }

                let distance = element.distance.ok_or(MatrixError::Element {
                    index,
                    status: "MISSING_DISTANCE".to_string(),
                })?;

                Ok(ResolvedDistance {
                    text: distance.text,
                    value: distance.value,
                })
            })
            .collect()
    }
}

impl DistanceMatrix for MatrixClient {
    fn distances<'a>(
        &'a self,
        origin: Coordinate,
        destinations: &'a [Coordinate],
    ) -> BoxFuture<'a, Result<Vec<ResolvedDistance>, MatrixError>> {
        Box::pin(self.fetch_distances(origin, destinations))
    }
}
