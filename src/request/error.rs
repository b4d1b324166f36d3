//! Error types for the request boundary.

use thiserror::Error;

/// Failure reported by a [`Transport`](super::Transport) implementation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// No response arrived within the request's `timeout_ms`.
    #[error("Timed out")]
    TimedOut,

    /// The exchange could not be completed (connection refused, DNS failure, ...).
    #[error("Transport failure: {0}")]
    Failed(String),
}

/// Errors delivered to the caller of [`request`](super::request).
#[derive(Debug, Error)]
pub enum RequestError {
    /// The server answered with a status of 400 or above.
    #[error("failed: {url}; status={status}")]
    Status { url: String, status: u16 },

    #[error("request timed out after {ms}ms")]
    Timeout { ms: u64 },

    #[error("Transport failure: {0}")]
    Transport(String),

    /// `is_json` was set but the body is not valid JSON.
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}
