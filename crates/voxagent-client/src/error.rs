use std::time::Duration;
use thiserror::Error;

/// Failures of a backend call.
///
/// `Server` displays as the backend's own detail text so callers can show
/// it to a user unchanged.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{detail}")]
    Server { status: u16, detail: String },

    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status of a rejected request, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
