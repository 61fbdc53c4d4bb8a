//! Opendatasoft records API DTOs.
//!
//! Field contents differ per dataset and are frequently missing or typed
//! inconsistently (numbers as strings and vice versa), so `fields` is kept
//! as raw JSON and interpreted in `convert`.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Response from `/api/records/1.0/search/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<Record>,
}

/// One dataset row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Record {
    pub recordid: Option<String>,

    /// Dataset-specific columns.
    #[serde(default)]
    pub fields: Map<String, Value>,

    /// Point geometry added by the portal, `[lon, lat]`.
    pub geometry: Option<RecordGeometry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordGeometry {
    #[serde(default)]
    pub coordinates: Value,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// A field rendered as text: strings as-is, numbers formatted.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.field(name)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_envelope() {
        let json = r#"{
            "nhits": 2,
            "records": [
                {"recordid": "abc", "fields": {"nombre": "Centro", "plazastota": 300},
                 "geometry": {"type": "Point", "coordinates": [-0.376, 39.474]}},
                {"recordid": "def"}
            ]
        }"#;
        let resp: RecordsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(resp.records.len(), 2);
        assert_eq!(resp.records[0].text("nombre").as_deref(), Some("Centro"));
        assert_eq!(resp.records[0].text("plazastota").as_deref(), Some("300"));
        assert!(resp.records[1].fields.is_empty());
        assert!(resp.records[1].geometry.is_none());
    }

    #[test]
    fn missing_records_is_empty() {
        let resp: RecordsResponse = serde_json::from_str(r#"{"error":"Unknown dataset"}"#).unwrap();
        assert!(resp.records.is_empty());
    }

    #[test]
    fn null_field_is_absent() {
        let rec: Record = serde_json::from_str(r#"{"fields":{"lineas":null}}"#).unwrap();
        assert!(rec.field("lineas").is_none());
    }
}
