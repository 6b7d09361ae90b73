use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Column;

/// A table reachable through a connection, as returned by `getTableSource`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSource {
    /// Resource path of the table source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// The table source definition, serialized as a JSON string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Table columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,
    /// Properties not named by the schema, kept as received.
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}

impl TableSource {
    /// Parses [`source`](Self::source) as JSON.
    ///
    /// Returns `None` when the source is absent.
    pub fn source_json(&self) -> Option<Result<Value, serde_json::Error>> {
        self.source.as_deref().map(serde_json::from_str)
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .as_deref()?
            .iter()
            .find(|c| c.name.as_deref() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Model;
    use serde_json::json;

    fn dict(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_from_dict() {
        let source = TableSource::from_dict(dict(json!({
            "resource": "/projects/p/connections/c/tableSource?tableKey=orders",
            "source": "{\"name\":\"orders\"}",
            "columns": [{"name": "id", "type": "number"}, {"name": "status", "type": "string"}]
        })))
        .unwrap();

        assert_eq!(source.column("id"), Some(&Column::new("id", "number")));
        assert_eq!(source.column("missing"), None);
        assert_eq!(
            source.source_json().unwrap().unwrap(),
            json!({"name": "orders"})
        );
    }

    #[test]
    fn test_unknown_properties_round_trip() {
        let input = json!({"resource": "r", "rowCount": 12});
        let source = TableSource::from_dict(dict(input.clone())).unwrap();

        assert_eq!(source.additional_properties["rowCount"], json!(12));
        assert_eq!(Value::Object(source.to_dict().unwrap()), input);
    }

    #[test]
    fn test_absent_properties_are_omitted() {
        let source = TableSource {
            resource: Some("r".to_string()),
            ..Default::default()
        };
        assert_eq!(Value::Object(source.to_dict().unwrap()), json!({"resource": "r"}));
    }

    #[test]
    fn test_null_properties_decode_as_absent() {
        let source = TableSource::from_dict(dict(json!({"source": null}))).unwrap();
        assert_eq!(source.source, None);
        assert!(source.source_json().is_none());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let err = TableSource::from_dict(dict(json!({"columns": "id"}))).unwrap_err();
        assert!(err.is_schema_mismatch());
    }
}
