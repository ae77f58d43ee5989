//! Books API error types

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from talking to the books backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout, or other transport failure
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status
    #[error("{url} returned {status}")]
    Status { status: StatusCode, url: String },

    /// Body was not the JSON we expected
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// HTTP status, if the backend answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend rejected the change because it already exists
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }
}
