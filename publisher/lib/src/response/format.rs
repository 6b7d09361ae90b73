//! Response format trait and implementations.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Trait for response body decoding strategies.
///
/// The format type encodes both the parsing strategy and the output type,
/// so an endpoint's status table can name `JsonFormat<TableSource>` and get
/// a `TableSource` back.
pub trait ResponseFormat {
    /// The output type after parsing.
    type Output;

    /// Parses a response body into the output type.
    fn parse(body: &[u8]) -> Result<Self::Output, ValidationError>;

    /// Returns the expected Content-Type for this format.
    fn content_type() -> &'static str;
}

/// JSON response format with typed deserialization.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned> ResponseFormat for JsonFormat<T> {
    type Output = T;

    fn parse(body: &[u8]) -> Result<Self::Output, ValidationError> {
        serde_json::from_slice(body).map_err(ValidationError::JsonParse)
    }

    fn content_type() -> &'static str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_json_parse() {
        let parsed = JsonFormat::<Named>::parse(br#"{"name":"orders"}"#).unwrap();
        assert_eq!(
            parsed,
            Named {
                name: "orders".to_string()
            }
        );
    }

    #[test]
    fn test_json_parse_empty_body() {
        let err = JsonFormat::<Named>::parse(b"").unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_json_parse_wrong_shape() {
        let err = JsonFormat::<Named>::parse(br#"{"name":42}"#).unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[test]
    fn test_content_type() {
        assert_eq!(JsonFormat::<Named>::content_type(), "application/json");
    }
}
