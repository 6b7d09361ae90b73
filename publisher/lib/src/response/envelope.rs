//! Response envelopes.

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use super::ParsedResponse;

/// An HTTP response as received, before any endpoint-specific decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body bytes.
    pub content: Bytes,
}

/// The full result of an endpoint call.
///
/// `parsed` is `None` only when the server answered with a status the
/// endpoint does not document and the client is configured not to raise.
#[derive(Debug, Clone)]
pub struct Response<T, E> {
    /// Response status.
    pub status: StatusCode,
    /// Raw response body.
    pub content: Bytes,
    /// Response headers.
    pub headers: HeaderMap,
    /// Decoded body, if the status is documented.
    pub parsed: Option<ParsedResponse<T, E>>,
}

impl<T, E> Response<T, E> {
    /// Assembles an envelope from a raw response and its decoded body.
    pub fn new(raw: RawResponse, parsed: Option<ParsedResponse<T, E>>) -> Self {
        Self {
            status: raw.status,
            content: raw.content,
            headers: raw.headers,
            parsed,
        }
    }

    /// Discards the envelope and returns the decoded body.
    pub fn into_parsed(self) -> Option<ParsedResponse<T, E>> {
        self.parsed
    }
}
