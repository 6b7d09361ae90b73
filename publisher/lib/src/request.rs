//! Endpoint definitions and per-call request descriptors.
//!
//! An [`Endpoint`] is the static half of a binding: its method and path
//! template. A [`RequestDescriptor`] is built fresh for every call from an
//! endpoint plus the caller's path and query parameters.

use url::Url;

use crate::error::ConfigError;
use crate::method::RestMethod;
use crate::types::Param;

/// A REST API endpoint definition.
///
/// ## Examples
///
/// ```rust
/// use publisher_sdk::{Endpoint, RestMethod};
///
/// const GET_PROJECT: Endpoint = Endpoint::new(
///     "getProject",
///     RestMethod::Get,
///     "/projects/{project_name}",
///     "Returns a project.",
/// );
///
/// assert_eq!(GET_PROJECT.path_params(), vec!["project_name"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    id: &'static str,
    method: RestMethod,
    path: &'static str,
    description: &'static str,
}

impl Endpoint {
    /// Creates an endpoint definition.
    pub const fn new(
        id: &'static str,
        method: RestMethod,
        path: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            method,
            path,
            description,
        }
    }

    /// Returns the endpoint's operation id.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the HTTP method for this endpoint.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Returns the path template (may contain `{param}` placeholders).
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the endpoint description.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Extracts path parameter names from the template, in order.
    pub fn path_params(&self) -> Vec<&'static str> {
        self.path
            .split('/')
            .filter_map(placeholder)
            .collect()
    }
}

/// Returns the parameter name if `segment` is a `{name}` placeholder.
fn placeholder(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}

/// A single outgoing request: method, path template, and parameter values.
///
/// Query parameters keep the order they were added in. Parameters added as
/// [`Param::Omitted`] never appear in the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    endpoint: Endpoint,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(&'static str, String)>,
    accept: Option<&'static str>,
}

impl RequestDescriptor {
    /// Starts a descriptor for `endpoint` with no parameters.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            path_params: Vec::new(),
            query: Vec::new(),
            accept: None,
        }
    }

    /// Sets the value for the `{name}` placeholder.
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Adds a query parameter when it was provided.
    pub fn query_param<T: ToString>(mut self, name: &'static str, value: &Param<T>) -> Self {
        if let Param::Provided(v) = value {
            self.query.push((name, v.to_string()));
        }
        self
    }

    /// Sets the media type sent in the `Accept` header.
    pub fn accept(mut self, content_type: &'static str) -> Self {
        self.accept = Some(content_type);
        self
    }

    /// Returns the media type for the `Accept` header, if set.
    pub fn accept_type(&self) -> Option<&'static str> {
        self.accept
    }

    /// Returns the endpoint this request targets.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> RestMethod {
        self.endpoint.method()
    }

    /// Returns the query parameters that will be sent.
    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Returns the request target with path parameters substituted verbatim.
    ///
    /// Placeholders without a value are left in place. Use [`url`](Self::url)
    /// for the encoded form that goes on the wire.
    pub fn path(&self) -> String {
        self.endpoint
            .path()
            .split('/')
            .map(|segment| {
                placeholder(segment)
                    .and_then(|name| self.path_param_value(name))
                    .unwrap_or(segment)
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn path_param_value(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Builds the full request URL under `base_url`.
    ///
    /// Each path parameter is percent-encoded as exactly one path segment, and
    /// any path already on `base_url` is kept as a prefix.
    ///
    /// ## Errors
    ///
    /// Returns an error if `base_url` cannot carry a path, a placeholder has
    /// no value, or a value is `.` or `..` (it would not survive as a segment).
    pub fn url(&self, base_url: &Url) -> Result<Url, ConfigError> {
        let mut url = base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ConfigError::CannotBeABase {
                    url: base_url.to_string(),
                })?;
            segments.pop_if_empty();

            for segment in self.endpoint.path().split('/').filter(|s| !s.is_empty()) {
                match placeholder(segment) {
                    Some(name) => {
                        let value = self
                            .path_param_value(name)
                            .ok_or_else(|| ConfigError::missing_path_param(name))?;
                        if matches!(value, "." | "..") {
                            return Err(ConfigError::dot_segment(name, value));
                        }
                        segments.push(value);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }

        url.set_query(None);
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }
}
