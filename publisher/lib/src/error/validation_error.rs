//! Response decoding errors.

use thiserror::Error;

/// Errors while decoding a response body into its declared model.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON parsing failed, or the JSON did not match the model.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ValidationError {
    /// Returns `true` if the body was not syntactically valid JSON.
    pub fn is_syntax(&self) -> bool {
        match self {
            Self::JsonParse(e) => e.is_syntax() || e.is_eof(),
        }
    }

    /// Returns `true` if the body was valid JSON of the wrong shape.
    pub fn is_schema_mismatch(&self) -> bool {
        match self {
            Self::JsonParse(e) => e.is_data(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = ValidationError::JsonParse(json_err);
        assert!(err.is_syntax());
        assert!(!err.is_schema_mismatch());
    }

    #[test]
    fn test_schema_mismatch() {
        let json_err = serde_json::from_str::<Vec<String>>(r#"{"code":"x"}"#).unwrap_err();
        let err = ValidationError::JsonParse(json_err);
        assert!(err.is_schema_mismatch());
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
