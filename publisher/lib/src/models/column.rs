use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A column of a table source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Column type as reported by the connection.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// Properties not named by the schema, kept as received.
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}

impl Column {
    /// Creates a column with a name and type and no extra properties.
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            r#type: Some(r#type.into()),
            additional_properties: Map::new(),
        }
    }
}
