//! Publisher API models.
//!
//! Every property is optional, matching the publisher's OpenAPI document, and
//! properties the schema does not name are kept in `additional_properties`
//! so nothing the server sends is lost.

mod column;
mod error;
mod table_source;

pub use column::Column;
pub use error::Error;
pub use table_source::TableSource;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Conversions between a model and a generic JSON object.
pub trait Model: Serialize + DeserializeOwned {
    /// Decodes a model from a JSON object.
    ///
    /// ## Errors
    ///
    /// Returns an error if a named property has the wrong type.
    fn from_dict(dict: Map<String, Value>) -> Result<Self, ValidationError> {
        serde_json::from_value(Value::Object(dict)).map_err(ValidationError::JsonParse)
    }

    /// Encodes the model as a JSON object, omitting absent properties.
    ///
    /// ## Errors
    ///
    /// Returns an error if serialization fails.
    fn to_dict(&self) -> Result<Map<String, Value>, ValidationError> {
        match serde_json::to_value(self).map_err(ValidationError::JsonParse)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

impl Model for Column {}
impl Model for Error {}
impl Model for TableSource {}
