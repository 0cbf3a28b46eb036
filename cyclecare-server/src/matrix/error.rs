//! Distance matrix client error types.

use std::fmt;

/// Errors from the distance matrix client.
#[derive(Debug)]
pub enum MatrixError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// Service returned a non-OK status
    Api {
        status: String,
        message: Option<String>,
    },

    /// A response element carried a non-OK status
    Element { index: usize, status: String },

    /// Response element count did not match the destinations submitted
    LengthMismatch { requested: usize, returned: usize },

    /// Quota exhausted
    RateLimited,

    /// API key rejected
    Denied,
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Http(e) => write!(f, "HTTP error: {e}"),
            MatrixError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            MatrixError::Api { status, message } => {
                write!(f, "service status {status}")?;
                if let Some(message) = message {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            MatrixError::Element { index, status } => {
                write!(f, "element {index} returned status {status}")
            }
            MatrixError::LengthMismatch {
                requested,
                returned,
            } => {
                write!(
                    f,
                    "response length mismatch: requested {requested} distances, got {returned}"
                )
            }
            MatrixError::RateLimited => write!(f, "rate limited by distance service"),
            MatrixError::Denied => write!(f, "request denied (check MAPS_API_KEY)"),
        }
    }
}

impl std::error::Error for MatrixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatrixError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MatrixError {
    fn from(err: reqwest::Error) -> Self {
        MatrixError::Http(err)
    }
}
