use std::time::Duration;

use thiserror::Error;

/// Every way a photo list request can fail.
///
/// Observers of [`crate::PhotoFeed`] never see these; the feed collapses all of
/// them into [`shared::domain::ApiStatus::Error`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid photos endpoint '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },
    #[error("photos request timed out after {timeout:?}")]
    Timeout { timeout: Duration },
    #[error("failed to connect to photos server: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("photos server responded with status {status}")]
    Status { status: reqwest::StatusCode },
    #[error("malformed photos payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("photos request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout }
        } else if err.is_connect() {
            Self::Connect(err)
        } else if let Some(status) = err.status() {
            Self::Status { status }
        } else {
            Self::Transport(err)
        }
    }

    /// Short machine-friendly label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEndpoint { .. } => "invalid_endpoint",
            Self::Timeout { .. } => "timeout",
            Self::Connect(_) => "connect",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
            Self::Transport(_) => "transport",
        }
    }
}
