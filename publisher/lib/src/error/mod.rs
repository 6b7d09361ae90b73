//! Layered error types for the publisher SDK.
//!
//! - [`ApiError`] - Top-level error returned by every client operation
//! - [`ClientError`] - Transport failures reported by `reqwest`
//! - [`ValidationError`] - Response bodies that do not match their schema
//! - [`ConfigError`] - Client and request configuration mistakes
//!
//! Server-reported failures (401, 404, 500 with an `Error` body) are not
//! errors at this layer; they come back as
//! [`ParsedResponse::Failure`](crate::response::ParsedResponse::Failure).

mod api_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
