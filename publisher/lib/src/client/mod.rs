//! HTTP client module.
//!
//! [`PublisherClient`] is the transport every endpoint binding delegates to.
//! It owns an async `reqwest` client, builds a blocking one on first blocking
//! use, and carries the client-level policy for undocumented statuses.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use publisher_sdk::PublisherClient;
//! use url::Url;
//!
//! let client = PublisherClient::builder(Url::parse("http://localhost:4000/api/v0")?)
//!     .token("sk-xxx")
//!     .raise_on_unexpected_status(true)
//!     .build()?;
//!
//! // Or from MALLOY_PUBLISHER_URL / MALLOY_PUBLISHER_TOKEN
//! let client = PublisherClient::from_env()?;
//! ```

mod env;
mod executor;

pub use env::{ENV_BASE_URL, ENV_RAISE_ON_UNEXPECTED_STATUS, ENV_TOKEN};
pub use executor::{PublisherClient, PublisherClientBuilder};
