//! Top-level API error type.

use bytes::Bytes;
use thiserror::Error;

use super::{ClientError, ConfigError, ValidationError};

/// Top-level error type for all publisher operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use publisher_sdk::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Client(e) => eprintln!("Network error: {e}"),
///         ApiError::Validation(e) => eprintln!("Invalid response: {e}"),
///         ApiError::Config(e) => eprintln!("Configuration error: {e}"),
///         ApiError::UnexpectedStatus { status, .. } => eprintln!("Undocumented status {status}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client errors (network, timeout, connection failures).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response body did not decode into the type declared for its status.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Client or request configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The server answered with a status the endpoint does not document and
    /// the client is configured to raise on unexpected statuses.
    #[error("Unexpected status code: {status}")]
    UnexpectedStatus {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body.
        content: Bytes,
    },
}

impl ApiError {
    /// Returns the status code carried by an [`ApiError::UnexpectedStatus`].
    pub fn unexpected_status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Client(_))
    }
}
