//! Common error types used across the workspace.
//!
//! Every backend request has its own error channel: a failed request yields a
//! [`FetchError`] naming the endpoint, and the caller decides which widget
//! degrades. Nothing here is ever fatal to the dashboard.

/// Failure of a single backend request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout, …).
    #[error("request to {endpoint} failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    /// The backend answered with a non-success HTTP status.
    #[error("request to {endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// The response body was not the expected JSON document.
    #[error("response from {endpoint} could not be decoded: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}

impl FetchError {
    /// The backend path the failed request targeted.
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }
}
