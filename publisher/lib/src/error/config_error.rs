//! Client and request configuration errors.

use thiserror::Error;

/// Errors in client or request configuration.
///
/// These indicate programmer or deployment mistakes and are raised before
/// any request leaves the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry a path (e.g. `mailto:` or `data:` URLs).
    #[error("Base URL cannot be used as a base: {url}")]
    CannotBeABase {
        /// The offending URL.
        url: String,
    },

    /// A path template placeholder had no value.
    #[error("Missing path parameter: {name}")]
    MissingPathParam {
        /// The placeholder name.
        name: String,
    },

    /// A path parameter value would be read as a `.` or `..` dot segment.
    #[error("Path parameter {name} cannot be {value:?}")]
    DotSegment {
        /// The placeholder name.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// A header name or value could not be encoded.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// The header name as given.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable: {var}")]
    MissingEnv {
        /// The variable name.
        var: &'static str,
    },

    /// An environment variable holds a value that cannot be interpreted.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// The variable name.
        var: &'static str,
        /// The value found.
        value: String,
    },
}

impl ConfigError {
    /// Creates a missing path parameter error.
    pub fn missing_path_param(name: impl Into<String>) -> Self {
        Self::MissingPathParam { name: name.into() }
    }

    /// Creates a dot segment error.
    pub fn dot_segment(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::DotSegment {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a missing environment variable error.
    pub fn missing_env(var: &'static str) -> Self {
        Self::MissingEnv { var }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.to_string(),
        }
    }
}
