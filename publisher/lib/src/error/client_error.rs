//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the HTTP transport.
///
/// These are passed through unchanged from `reqwest`; the SDK never retries
/// or recovers from them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ClientError {
    /// Returns `true` if the request exceeded the configured timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout(),
        }
    }

    /// Returns `true` if the connection to the server could not be established.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect(),
        }
    }
}
