use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single token API call.
///
/// Every variant collapses to the same user-visible behavior at the
/// operation boundary; the detail is only for the diagnostic log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("HTTP {}: {}", .status.as_u16(), .reason)]
    HttpError { status: StatusCode, reason: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an `HttpError` from a non-2xx status, using the canonical
    /// reason phrase the way a browser's `statusText` would.
    pub fn from_status(status: StatusCode) -> Self {
        ApiError::HttpError {
            status,
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest_middleware::Error> for ApiError {
    fn from(e: reqwest_middleware::Error) -> Self {
        ApiError::NetworkFailure(e.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::NetworkFailure(e.to_string())
        }
    }
}
