//! `GET /projects/{project_name}/connections/{connection_name}/tableSource`
//!
//! Returns a table source, identified by `tableKey` or `tablePath`.
//!
//! | Status | Body |
//! |---|---|
//! | 200 | [`TableSource`] |
//! | 401, 404, 500 | [`Error`] |
//!
//! Any other status is unexpected: it fails with
//! [`ApiError::UnexpectedStatus`] when the client raises on unexpected
//! statuses, and yields no parsed body otherwise.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use publisher_sdk::api::connections::get_tablesource::{self, GetTableSourceRequest};
//! use publisher_sdk::ParsedResponse;
//!
//! let request = GetTableSourceRequest::new("malloy-samples", "bigquery").table_key("orders");
//! match get_tablesource::get_table_source(&client, &request).await? {
//!     Some(ParsedResponse::Success(source)) => println!("{:?}", source.columns),
//!     Some(ParsedResponse::Failure(error)) => eprintln!("server error: {error}"),
//!     None => eprintln!("undocumented status"),
//! }
//! ```

use reqwest::StatusCode;
use tracing::instrument;

use crate::client::PublisherClient;
use crate::error::ApiError;
use crate::method::RestMethod;
use crate::models::{Error, TableSource};
use crate::operation::{Operation, StatusClass};
use crate::request::{Endpoint, RequestDescriptor};
use crate::response::{JsonFormat, ParsedResponse, Response, ResponseFormat};
use crate::types::Param;

/// Endpoint definition for `getTableSource`.
pub const ENDPOINT: Endpoint = Endpoint::new(
    "getTableSource",
    RestMethod::Get,
    "/projects/{project_name}/connections/{connection_name}/tableSource",
    "Returns a table source.",
);

/// Full response envelope for `getTableSource`.
pub type GetTableSourceResponse = Response<TableSource, Error>;

/// Parsed body for `getTableSource`.
pub type GetTableSourceResult = ParsedResponse<TableSource, Error>;

/// Parameters for `getTableSource`.
///
/// `table_key` and `table_path` are both optional and not mutually
/// exclusive here; the server decides what to do with the combination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetTableSourceRequest {
    pub project_name: String,
    pub connection_name: String,
    /// Sent as `tableKey`.
    pub table_key: Param<String>,
    /// Sent as `tablePath`.
    pub table_path: Param<String>,
}

impl GetTableSourceRequest {
    /// Creates a request with no table key or path.
    pub fn new(project_name: impl Into<String>, connection_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            connection_name: connection_name.into(),
            ..Default::default()
        }
    }

    /// Sets `tableKey`.
    pub fn table_key(mut self, table_key: impl Into<String>) -> Self {
        self.table_key = Param::Provided(table_key.into());
        self
    }

    /// Sets `tablePath`.
    pub fn table_path(mut self, table_path: impl Into<String>) -> Self {
        self.table_path = Param::Provided(table_path.into());
        self
    }
}

impl Operation for GetTableSourceRequest {
    type Success = TableSource;
    type Failure = Error;

    fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor::new(ENDPOINT)
            .path_param("project_name", &self.project_name)
            .path_param("connection_name", &self.connection_name)
            .query_param("tableKey", &self.table_key)
            .query_param("tablePath", &self.table_path)
            .accept(JsonFormat::<TableSource>::content_type())
    }

    fn classify(status: StatusCode) -> StatusClass {
        match status.as_u16() {
            200 => StatusClass::Success,
            401 | 404 | 500 => StatusClass::Failure,
            _ => StatusClass::Unexpected,
        }
    }
}

/// Fetches a table source and returns the full response envelope.
///
/// ## Errors
///
/// Returns an error if the transport fails, the body does not match the model
/// for its status, or the status is undocumented and `client` raises on
/// unexpected statuses.
#[instrument(
    name = "get_tablesource",
    skip_all,
    fields(project = %request.project_name, connection = %request.connection_name)
)]
pub async fn get_table_source_detailed(
    client: &PublisherClient,
    request: &GetTableSourceRequest,
) -> Result<GetTableSourceResponse, ApiError> {
    client.send_detailed(request).await
}

/// Fetches a table source and returns only the parsed body.
///
/// A 401, 404 or 500 comes back as `Some(ParsedResponse::Failure(_))`, not as
/// an `Err`. `None` means an undocumented status on a non-raising client.
///
/// ## Errors
///
/// See [`get_table_source_detailed`].
pub async fn get_table_source(
    client: &PublisherClient,
    request: &GetTableSourceRequest,
) -> Result<Option<GetTableSourceResult>, ApiError> {
    Ok(get_table_source_detailed(client, request)
        .await?
        .into_parsed())
}

/// Blocking counterpart of [`get_table_source_detailed`].
///
/// Must not be called from inside an async runtime.
///
/// ## Errors
///
/// See [`get_table_source_detailed`].
#[instrument(
    name = "get_tablesource",
    skip_all,
    fields(project = %request.project_name, connection = %request.connection_name)
)]
pub fn get_table_source_blocking_detailed(
    client: &PublisherClient,
    request: &GetTableSourceRequest,
) -> Result<GetTableSourceResponse, ApiError> {
    client.send_blocking_detailed(request)
}

/// Blocking counterpart of [`get_table_source`].
///
/// ## Errors
///
/// See [`get_table_source_detailed`].
pub fn get_table_source_blocking(
    client: &PublisherClient,
    request: &GetTableSourceRequest,
) -> Result<Option<GetTableSourceResult>, ApiError> {
    Ok(get_table_source_blocking_detailed(client, request)?.into_parsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TARGET: &str = "/projects/proj1/connections/conn1/tableSource";

    fn client(server: &MockServer, raise: bool) -> PublisherClient {
        PublisherClient::builder(Url::parse(&server.uri()).unwrap())
            .raise_on_unexpected_status(raise)
            .build()
            .unwrap()
    }

    fn orders() -> TableSource {
        serde_json::from_value(json!({
            "resource": "/projects/proj1/connections/conn1/tableSource?tableKey=orders",
            "source": "{\"name\":\"orders\"}",
            "columns": [{"name": "id", "type": "number"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_query_params_for_every_combination() {
        let cases = [
            (Param::Omitted, Param::Omitted, vec![]),
            (
                Param::Provided("k".to_string()),
                Param::Omitted,
                vec![("tableKey", "k".to_string())],
            ),
            (
                Param::Omitted,
                Param::Provided("p".to_string()),
                vec![("tablePath", "p".to_string())],
            ),
            (
                Param::Provided("k".to_string()),
                Param::Provided("p".to_string()),
                vec![("tableKey", "k".to_string()), ("tablePath", "p".to_string())],
            ),
        ];

        for (table_key, table_path, expected) in cases {
            let request = GetTableSourceRequest {
                table_key,
                table_path,
                ..GetTableSourceRequest::new("proj1", "conn1")
            };
            assert_eq!(request.descriptor().query(), expected.as_slice());
        }
    }

    #[test]
    fn test_provided_empty_key_is_sent() {
        let request = GetTableSourceRequest::new("proj1", "conn1").table_key("");
        assert_eq!(request.descriptor().query(), &[("tableKey", String::new())]);
    }

    #[test]
    fn test_request_target() {
        let descriptor = GetTableSourceRequest::new("proj1", "conn1").descriptor();
        assert_eq!(descriptor.method(), RestMethod::Get);
        assert_eq!(descriptor.path(), TARGET);
        assert!(descriptor.query().is_empty());
    }

    #[test]
    fn test_classify() {
        let classify = |code| GetTableSourceRequest::classify(StatusCode::from_u16(code).unwrap());
        assert_eq!(classify(200), StatusClass::Success);
        assert_eq!(classify(401), StatusClass::Failure);
        assert_eq!(classify(404), StatusClass::Failure);
        assert_eq!(classify(500), StatusClass::Failure);
        assert_eq!(classify(201), StatusClass::Unexpected);
        assert_eq!(classify(403), StatusClass::Unexpected);
        assert_eq!(classify(418), StatusClass::Unexpected);
    }

    #[tokio::test]
    async fn test_success_returns_table_source() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TARGET))
            .and(query_param("tableKey", "orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(orders()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, false);
        let request = GetTableSourceRequest::new("proj1", "conn1").table_key("orders");

        let parsed = get_table_source(&client, &request).await.unwrap();
        assert_eq!(parsed, Some(ParsedResponse::Success(orders())));
    }

    #[tokio::test]
    async fn test_detailed_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TARGET))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-publisher-version", "0.0.1")
                    .set_body_json(orders()),
            )
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, false);
        let request = GetTableSourceRequest::new("proj1", "conn1");

        let response = get_table_source_detailed(&client, &request).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers["x-publisher-version"], "0.0.1");
        assert_eq!(
            serde_json::from_slice::<TableSource>(&response.content).unwrap(),
            orders()
        );
        assert_eq!(response.parsed, Some(ParsedResponse::Success(orders())));
    }

    #[tokio::test]
    async fn test_omitted_params_are_not_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TARGET))
            .respond_with(ResponseTemplate::new(200).set_body_json(orders()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, false);
        let request = GetTableSourceRequest::new("proj1", "conn1");
        get_table_source(&client, &request).await.unwrap();

        let received = mock_server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_not_found_is_a_value() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TARGET))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "404",
                "message": "Table not found"
            })))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, true);
        let request = GetTableSourceRequest::new("proj1", "conn1").table_path("missing.csv");

        let parsed = get_table_source(&client, &request).await.unwrap();
        let error = parsed.unwrap().into_result().unwrap_err();
        assert_eq!(error.code.as_deref(), Some("404"));
        assert_eq!(error.message.as_deref(), Some("Table not found"));
    }

    #[tokio::test]
    async fn test_unauthorized_and_server_error_are_values() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/locked/connections/conn1/tableSource"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/projects/broken/connections/conn1/tableSource"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"code": "500"})))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, true);

        let unauthorized = get_table_source_detailed(
            &client,
            &GetTableSourceRequest::new("locked", "conn1"),
        )
        .await
        .unwrap();
        assert_eq!(unauthorized.status.as_u16(), 401);
        assert!(unauthorized.parsed.unwrap().is_failure());

        let broken = get_table_source_detailed(
            &client,
            &GetTableSourceRequest::new("broken", "conn1"),
        )
        .await
        .unwrap();
        assert_eq!(broken.status.as_u16(), 500);
        assert!(broken.parsed.unwrap().is_failure());
    }

    #[tokio::test]
    async fn test_unexpected_status_raises() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TARGET))
            .respond_with(ResponseTemplate::new(418).set_body_string("I'm a teapot"))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, true);
        let request = GetTableSourceRequest::new("proj1", "conn1");

        let result = get_table_source(&client, &request).await;
        if let Err(ApiError::UnexpectedStatus { status, content }) = result {
            assert_eq!(status, 418);
            assert_eq!(&content[..], b"I'm a teapot");
        } else {
            panic!("Expected UnexpectedStatus, got {:?}", result);
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_unexpected_status_without_raise_returns_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TARGET))
            .respond_with(ResponseTemplate::new(418).set_body_string("I'm a teapot"))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, false);
        let request = GetTableSourceRequest::new("proj1", "conn1");

        let parsed = get_table_source(&client, &request).await.unwrap();
        assert!(parsed.is_none());

        let response = get_table_source_detailed(&client, &request).await.unwrap();
        assert_eq!(response.status.as_u16(), 418);
        assert_eq!(&response.content[..], b"I'm a teapot");
        assert!(response.parsed.is_none());

        assert!(logs_contain("get_tablesource"));
        assert!(logs_contain("unexpected status"));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_a_decoding_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(TARGET))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, false);
        let request = GetTableSourceRequest::new("proj1", "conn1");

        let result = get_table_source(&client, &request).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_path_params_are_encoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/my%20project/connections/a%2Fb/tableSource"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, true);
        let request = GetTableSourceRequest::new("my project", "a/b");

        let parsed = get_table_source(&client, &request).await.unwrap();
        assert_eq!(parsed, Some(ParsedResponse::Success(TableSource::default())));
    }

    #[tokio::test]
    async fn test_dot_segment_names_are_rejected_before_sending() {
        let mock_server = MockServer::start().await;
        let client = client(&mock_server, true);

        for project in [".", ".."] {
            let request = GetTableSourceRequest::new(project, "conn1");
            let result = get_table_source(&client, &request).await;
            assert!(matches!(
                result,
                Err(ApiError::Config(crate::error::ConfigError::DotSegment { ref name, .. }))
                    if name == "project_name"
            ));
        }

        let received = mock_server.received_requests().await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = PublisherClient::new(Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let request = GetTableSourceRequest::new("proj1", "conn1");

        let result = get_table_source(&client, &request).await;
        assert!(matches!(result, Err(ref e) if e.is_transport()));
    }
}
