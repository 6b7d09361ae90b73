//! Request execution with tracing instrumentation.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use tracing::{Span, debug, instrument};
use url::Url;

use crate::error::{ApiError, ClientError, ConfigError};
use crate::request::RequestDescriptor;
use crate::response::RawResponse;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default auth token prefix.
const DEFAULT_TOKEN_PREFIX: &str = "Bearer";

/// Builder for configuring a [`PublisherClient`].
#[derive(Debug)]
pub struct PublisherClientBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    cookies: Vec<(String, String)>,
    token: Option<String>,
    auth_header: HeaderName,
    token_prefix: String,
    follow_redirects: bool,
    verify_ssl: bool,
    raise_on_unexpected_status: bool,
}

impl PublisherClientBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            cookies: Vec::new(),
            token: None,
            auth_header: AUTHORIZATION,
            token_prefix: DEFAULT_TOKEN_PREFIX.to_string(),
            follow_redirects: false,
            verify_ssl: true,
            raise_on_unexpected_status: false,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let name_str = name.as_ref();
        let header_name = HeaderName::try_from(name_str)
            .map_err(|e| ConfigError::invalid_header(name_str, e))?;
        let header_value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(name_str, e))?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Adds a cookie sent with every request.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    /// Sets the auth token sent with every request.
    ///
    /// By default it is sent as `Authorization: Bearer <token>`; see
    /// [`auth_header`](Self::auth_header).
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Changes the header and prefix used for the token.
    ///
    /// An empty prefix sends the bare token.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name is invalid.
    pub fn auth_header(
        mut self,
        name: impl AsRef<str>,
        prefix: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let name = name.as_ref();
        self.auth_header =
            HeaderName::try_from(name).map_err(|e| ConfigError::invalid_header(name, e))?;
        self.token_prefix = prefix.into();
        Ok(self)
    }

    /// Follows HTTP redirects (off by default).
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// Verifies TLS certificates (on by default).
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Fails with [`ApiError::UnexpectedStatus`] on undocumented statuses
    /// instead of returning an empty parsed body (off by default).
    pub fn raise_on_unexpected_status(mut self, raise: bool) -> Self {
        self.raise_on_unexpected_status = raise;
        self
    }

    /// Builds the [`PublisherClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the token or cookies do not form valid header
    /// values, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<PublisherClient, ApiError> {
        let mut headers = self.default_headers;

        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            let value = HeaderValue::try_from(cookie)
                .map_err(|e| ConfigError::invalid_header(COOKIE.as_str(), e))?;
            headers.insert(COOKIE, value);
        }

        if let Some(token) = &self.token {
            let credential = if self.token_prefix.is_empty() {
                token.clone()
            } else {
                format!("{} {token}", self.token_prefix)
            };
            let mut value = HeaderValue::try_from(credential)
                .map_err(|e| ConfigError::invalid_header(self.auth_header.as_str(), e))?;
            value.set_sensitive(true);
            headers.insert(self.auth_header.clone(), value);
        }

        let transport = Transport {
            timeout: self.timeout,
            headers,
            follow_redirects: self.follow_redirects,
            verify_ssl: self.verify_ssl,
        };

        Ok(PublisherClient {
            client: transport.async_client()?,
            blocking: Arc::new(OnceLock::new()),
            transport: Arc::new(transport),
            base_url: self.base_url,
            raise_on_unexpected_status: self.raise_on_unexpected_status,
        })
    }
}

/// Settings shared by the async and blocking `reqwest` clients.
#[derive(Debug)]
struct Transport {
    timeout: Duration,
    headers: HeaderMap,
    follow_redirects: bool,
    verify_ssl: bool,
}

impl Transport {
    fn redirect_policy(&self) -> Policy {
        if self.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        }
    }

    fn async_client(&self) -> Result<reqwest::Client, ClientError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.headers.clone())
            .redirect(self.redirect_policy())
            .danger_accept_invalid_certs(!self.verify_ssl)
            .build()
            .map_err(ClientError::Request)
    }

    fn blocking_client(&self) -> Result<reqwest::blocking::Client, ClientError> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.headers.clone())
            .redirect(self.redirect_policy())
            .danger_accept_invalid_certs(!self.verify_ssl)
            .build()
            .map_err(ClientError::Request)
    }
}

/// HTTP client for the Malloy Publisher API.
///
/// Cloning is cheap and clones share connection pools. The client keeps no
/// per-call state.
///
/// The blocking methods must not be called from inside an async runtime,
/// and a client whose blocking transport has been used should be dropped
/// outside one.
///
/// ## Examples
///
/// ```rust,ignore
/// use publisher_sdk::{PublisherClient, RequestDescriptor};
///
/// let client = PublisherClient::new(base_url)?;
/// let raw = client.execute(&descriptor).await?;
/// println!("{} ({} bytes)", raw.status, raw.content.len());
/// ```
#[derive(Debug, Clone)]
pub struct PublisherClient {
    client: reqwest::Client,
    blocking: Arc<OnceLock<reqwest::blocking::Client>>,
    transport: Arc<Transport>,
    base_url: Url,
    raise_on_unexpected_status: bool,
}

impl PublisherClient {
    /// Creates a new builder for configuring a client.
    pub fn builder(base_url: Url) -> PublisherClientBuilder {
        PublisherClientBuilder::new(base_url)
    }

    /// Creates a new client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }

    /// Returns the base URL for this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns `true` if undocumented statuses fail with
    /// [`ApiError::UnexpectedStatus`].
    pub fn raises_on_unexpected_status(&self) -> bool {
        self.raise_on_unexpected_status
    }

    /// Sends a request and collects the full response body.
    ///
    /// The status is not inspected here; mapping statuses to bodies is the
    /// endpoint's job.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL cannot be built or the transport fails.
    #[instrument(
        name = "api_request",
        skip(self, request),
        fields(
            endpoint = request.endpoint().id(),
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, ApiError> {
        let url = self.prepare(request)?;

        let mut builder = self.client.request(request.method().to_reqwest(), url);
        if let Some(accept) = request.accept_type() {
            builder = builder.header(ACCEPT, accept);
        }

        let response = builder.send().await.map_err(ClientError::Request)?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let headers = response.headers().clone();
        let content = response.bytes().await.map_err(ClientError::Request)?;
        debug!(bytes = content.len(), "response received");

        Ok(RawResponse {
            status,
            headers,
            content,
        })
    }

    /// Blocking counterpart of [`execute`](Self::execute).
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL cannot be built, the blocking client cannot
    /// be constructed, or the transport fails.
    #[instrument(
        name = "api_request",
        skip(self, request),
        fields(
            endpoint = request.endpoint().id(),
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub fn execute_blocking(&self, request: &RequestDescriptor) -> Result<RawResponse, ApiError> {
        let url = self.prepare(request)?;

        let mut builder = self
            .blocking_client()?
            .request(request.method().to_reqwest(), url);
        if let Some(accept) = request.accept_type() {
            builder = builder.header(ACCEPT, accept);
        }

        let response = builder.send().map_err(ClientError::Request)?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let headers = response.headers().clone();
        let content = response.bytes().map_err(ClientError::Request)?;
        debug!(bytes = content.len(), "response received");

        Ok(RawResponse {
            status,
            headers,
            content,
        })
    }

    /// Builds the request URL and records it on the current span.
    fn prepare(&self, request: &RequestDescriptor) -> Result<Url, ApiError> {
        let url = request.url(&self.base_url)?;
        let span = Span::current();
        span.record("http.method", request.method().to_string().as_str());
        span.record("http.url", url.as_str());
        Ok(url)
    }

    fn blocking_client(&self) -> Result<&reqwest::blocking::Client, ClientError> {
        if let Some(client) = self.blocking.get() {
            return Ok(client);
        }
        let client = self.transport.blocking_client()?;
        Ok(self.blocking.get_or_init(|| client))
    }
}
