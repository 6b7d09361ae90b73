//! Rust client for the Malloy Publisher REST API.
//!
//! The crate pairs a small HTTP runtime with generated-style endpoint
//! bindings:
//!
//! - **Endpoints**: [`api`] holds one module per operation, each exposing an
//!   async and a blocking entry point in "detailed" (full envelope) and plain
//!   (parsed body only) forms
//! - **Client**: [`PublisherClient`] wraps `reqwest` and carries the
//!   client-level "raise on unexpected status" policy
//! - **Typed responses**: documented success and error bodies decode into
//!   [`models`]; application-level errors (401, 404, 500) are values, not
//!   `Err`s
//! - **Layered errors**: [`ApiError`] separates transport, decoding,
//!   configuration and unexpected-status failures
//!
//! ## Example
//!
//! ```rust,ignore
//! use publisher_sdk::api::connections::get_tablesource::{get_table_source, GetTableSourceRequest};
//! use publisher_sdk::{ParsedResponse, PublisherClient};
//!
//! let client = PublisherClient::from_env()?;
//! let request = GetTableSourceRequest::new("malloy-samples", "duckdb").table_path("data/orders.parquet");
//!
//! if let Some(ParsedResponse::Success(source)) = get_table_source(&client, &request).await? {
//!     for column in source.columns.unwrap_or_default() {
//!         println!("{:?}: {:?}", column.name, column.r#type);
//!     }
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod method;
pub mod models;
pub mod operation;
pub mod request;
pub mod response;
pub mod types;

// Re-exports for convenience
pub use client::{PublisherClient, PublisherClientBuilder};
pub use error::{ApiError, ClientError, ConfigError, ValidationError};
pub use method::RestMethod;
pub use models::Model;
pub use operation::{Operation, StatusClass};
pub use request::{Endpoint, RequestDescriptor};
pub use response::{ParsedResponse, RawResponse, Response};
pub use types::Param;
