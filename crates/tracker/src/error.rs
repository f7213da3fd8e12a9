//! Error types for tracker fetches.

use thiserror::Error;

/// Errors that can occur while fetching tasks from the tracker.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failure (connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Tracker answered with a non-success status
    #[error("tracker returned HTTP {code}")]
    Status { code: u16 },

    /// Response body did not match the expected shape
    #[error("failed to decode tracker response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No credentials configured; treated as an ordinary fetch failure
    #[error("tracker credentials are not configured")]
    MissingCredentials,
}
