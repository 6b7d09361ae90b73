//! Environment-based client configuration.

use url::Url;

use super::{PublisherClient, PublisherClientBuilder};
use crate::error::{ApiError, ConfigError};

/// Base URL of the publisher API, e.g. `http://localhost:4000/api/v0`.
pub const ENV_BASE_URL: &str = "MALLOY_PUBLISHER_URL";
/// Optional bearer token.
pub const ENV_TOKEN: &str = "MALLOY_PUBLISHER_TOKEN";
/// Optional boolean enabling [`ApiError::UnexpectedStatus`].
pub const ENV_RAISE_ON_UNEXPECTED_STATUS: &str = "MALLOY_PUBLISHER_RAISE_ON_UNEXPECTED_STATUS";

impl PublisherClient {
    /// Creates a client configured from the process environment.
    ///
    /// Reads [`ENV_BASE_URL`] (required), [`ENV_TOKEN`] and
    /// [`ENV_RAISE_ON_UNEXPECTED_STATUS`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL is missing or malformed, or a value
    /// cannot be interpreted.
    pub fn from_env() -> Result<Self, ApiError> {
        PublisherClientBuilder::from_vars(|var| std::env::var(var).ok())?.build()
    }
}

impl PublisherClientBuilder {
    /// Creates a builder from a variable lookup function.
    ///
    /// [`PublisherClient::from_env`] uses the process environment; tests and
    /// embedders can pass any lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::missing_env(ENV_BASE_URL))?;
        let mut builder = PublisherClient::builder(Url::parse(base_url.trim())?);

        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            builder = builder.token(token);
        }

        if let Some(value) = lookup(ENV_RAISE_ON_UNEXPECTED_STATUS) {
            let raise = parse_bool(&value).ok_or(ConfigError::InvalidEnv {
                var: ENV_RAISE_ON_UNEXPECTED_STATUS,
                value,
            })?;
            builder = builder.raise_on_unexpected_status(raise);
        }

        Ok(builder)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
