//! Station data source error types.

/// Errors that can occur when loading or fetching the station set.
#[derive(Debug, thiserror::Error)]
pub enum DropoffError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response or file JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read from the data directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data directory held no GeoJSON files
    #[error("no GeoJSON files found in {dir}")]
    NoData { dir: String },
}
