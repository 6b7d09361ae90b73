//! HTTP method types for publisher endpoints.

use strum::{Display, EnumString};

/// HTTP methods used by publisher endpoints.
///
/// ## Examples
///
/// ```rust
/// use publisher_sdk::RestMethod;
///
/// let parsed: RestMethod = "GET".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Get);
/// assert_eq!(parsed.to_string(), "GET");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource.
    Get,
}

impl RestMethod {
    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
