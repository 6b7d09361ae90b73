//! The shape every endpoint binding follows.
//!
//! An [`Operation`] knows how to describe its request and which statuses map
//! to its success and failure models. The client methods here do the rest:
//! send, then decode according to [`Operation::classify`].

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::client::PublisherClient;
use crate::error::ApiError;
use crate::request::RequestDescriptor;
use crate::response::{JsonFormat, ParsedResponse, RawResponse, Response, ResponseFormat};

/// How an endpoint treats a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Documented success; decode as [`Operation::Success`].
    Success,
    /// Documented error; decode as [`Operation::Failure`].
    Failure,
    /// Not documented for this endpoint.
    Unexpected,
}

/// A single API operation.
pub trait Operation {
    /// Model returned for success statuses.
    type Success: DeserializeOwned;
    /// Model returned for documented error statuses.
    type Failure: DeserializeOwned;

    /// Builds the request for this call.
    fn descriptor(&self) -> RequestDescriptor;

    /// Classifies a response status.
    fn classify(status: StatusCode) -> StatusClass;
}

/// Envelope type produced by an operation.
pub type OperationResponse<O> =
    Response<<O as Operation>::Success, <O as Operation>::Failure>;

/// Parsed body type produced by an operation.
pub type OperationResult<O> =
    ParsedResponse<<O as Operation>::Success, <O as Operation>::Failure>;

impl PublisherClient {
    /// Sends an operation and returns the full response envelope.
    ///
    /// ## Errors
    ///
    /// Returns an error if the transport fails, the body does not match the
    /// model for its status, or the status is undocumented and this client
    /// raises on unexpected statuses.
    pub async fn send_detailed<O: Operation>(
        &self,
        operation: &O,
    ) -> Result<OperationResponse<O>, ApiError> {
        let raw = self.execute(&operation.descriptor()).await?;
        self.build_response::<O>(raw)
    }

    /// Sends an operation and returns only the parsed body.
    ///
    /// `None` means the status was undocumented and this client does not
    /// raise on unexpected statuses.
    ///
    /// ## Errors
    ///
    /// See [`send_detailed`](Self::send_detailed).
    pub async fn send<O: Operation>(
        &self,
        operation: &O,
    ) -> Result<Option<OperationResult<O>>, ApiError> {
        Ok(self.send_detailed(operation).await?.into_parsed())
    }

    /// Blocking counterpart of [`send_detailed`](Self::send_detailed).
    ///
    /// ## Errors
    ///
    /// See [`send_detailed`](Self::send_detailed).
    pub fn send_blocking_detailed<O: Operation>(
        &self,
        operation: &O,
    ) -> Result<OperationResponse<O>, ApiError> {
        let raw = self.execute_blocking(&operation.descriptor())?;
        self.build_response::<O>(raw)
    }

    /// Blocking counterpart of [`send`](Self::send).
    ///
    /// ## Errors
    ///
    /// See [`send_detailed`](Self::send_detailed).
    pub fn send_blocking<O: Operation>(
        &self,
        operation: &O,
    ) -> Result<Option<OperationResult<O>>, ApiError> {
        Ok(self.send_blocking_detailed(operation)?.into_parsed())
    }

    /// Decodes a raw response according to the operation's status table.
    pub fn build_response<O: Operation>(
        &self,
        raw: RawResponse,
    ) -> Result<OperationResponse<O>, ApiError> {
        let parsed = self.parse_response::<O>(&raw)?;
        Ok(Response::new(raw, parsed))
    }

    fn parse_response<O: Operation>(
        &self,
        raw: &RawResponse,
    ) -> Result<Option<OperationResult<O>>, ApiError> {
        match O::classify(raw.status) {
            StatusClass::Success => {
                let body = JsonFormat::<O::Success>::parse(&raw.content)?;
                Ok(Some(ParsedResponse::Success(body)))
            }
            StatusClass::Failure => {
                let body = JsonFormat::<O::Failure>::parse(&raw.content)?;
                Ok(Some(ParsedResponse::Failure(body)))
            }
            StatusClass::Unexpected if self.raises_on_unexpected_status() => {
                warn!(status = raw.status.as_u16(), "unexpected status, raising");
                Err(ApiError::UnexpectedStatus {
                    status: raw.status.as_u16(),
                    content: raw.content.clone(),
                })
            }
            StatusClass::Unexpected => {
                warn!(status = raw.status.as_u16(), "unexpected status, no parsed body");
                Ok(None)
            }
        }
    }
}
