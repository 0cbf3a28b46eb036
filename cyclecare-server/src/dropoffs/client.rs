//! HTTP client for a remote station data endpoint.

use std::sync::Arc;

use crate::domain::{Coordinate, Station};

use super::error::DropoffError;
use super::types::{FeatureCollection, into_stations};

/// Configuration for the dropoff endpoint client.
#[derive(Debug, Clone)]
pub struct DropoffClientConfig {
    /// Base URL of the server exposing `/data/dropoffs`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DropoffClientConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for a remote station data source.
#[derive(Debug, Clone)]
pub struct DropoffClient {
    http: reqwest::Client,
    base_url: String,
}

impl DropoffClient {
    /// Create a new dropoff client.
    pub fn new(config: DropoffClientConfig) -> Result<Self, DropoffError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the station set around a center point.
    ///
    /// The known data source ignores the center parameters and returns
    /// the full set; they are sent anyway per its interface.
    pub async fn fetch(&self, center: Coordinate) -> Result<Vec<Arc<Station>>, DropoffError> {
        let url = format!("{}/data/dropoffs", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("centerLat", center.lat().to_string()),
                ("centerLng", center.lng().to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DropoffError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let collection: FeatureCollection =
            serde_json::from_str(&body).map_err(|e| DropoffError::Json {
                message: e.to_string(),
            })?;

        Ok(into_stations(collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = DropoffClientConfig::new("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_timeout() {
        let config = DropoffClientConfig::new("http://localhost:8080").with_timeout(5);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        let config = DropoffClientConfig::new("http://localhost:8080");
        assert!(DropoffClient::new(config).is_ok());
    }
}
