//! BatchIngestionInput - caller supplied descriptor
//!
//! Destination index, field mapping, opaque credential and the raw
//! `data_source` tagged union. The union stays untyped here; the validator
//! turns it into a [`DataSource`](crate::DataSource).

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Discriminator key of the `data_source` union
pub const DATA_SOURCE_TYPE: &str = "type";

/// Address-list key of the `data_source` union
pub const DATA_SOURCE_SOURCE: &str = "source";

/// Reserved field mapping keys
pub const INPUT_FIELD_NAMES: &str = "input_field_names";
pub const OUTPUT_FIELD_NAMES: &str = "output_field_names";
pub const INGEST_FIELDS: &str = "ingest_fields";

/// Batch ingestion descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct BatchIngestionInput {
    /// Destination index
    #[validate(length(min = 1))]
    #[serde(default, alias = "indexName")]
    pub index_name: String,

    /// Field mapping used by the ingestion engine
    #[serde(default, alias = "fieldMapping", alias = "field_mapping")]
    pub field_map: FieldMapping,

    /// Opaque secrets handed to the ingestion engine
    #[serde(default)]
    pub credential: Credential,

    /// Raw data source union, keyed by `type`
    #[serde(
        default,
        alias = "dataSources",
        alias = "data_sources",
        deserialize_with = "null_as_empty"
    )]
    pub data_source: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl BatchIngestionInput {
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            ..Default::default()
        }
    }

    pub fn with_field_map(mut self, field_map: FieldMapping) -> Self {
        self.field_map = field_map;
        self
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_data_source(mut self, data_source: Map<String, Value>) -> Self {
        self.data_source = data_source;
        self
    }

    /// Shorthand for a `{type, source: [..]}` data source
    pub fn with_source<I, S>(self, source_type: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut data_source = Map::new();
        data_source.insert(DATA_SOURCE_TYPE.into(), Value::from(source_type));
        data_source.insert(
            DATA_SOURCE_SOURCE.into(),
            Value::Array(entries.into_iter().map(|e| Value::String(e.into())).collect()),
        );
        self.with_data_source(data_source)
    }
}

/// Field mapping with reserved derived lists
///
/// Unreserved keys (JSON-path expressions such as `input` / `output`) are kept
/// as-is in `expressions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_field_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_field_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest_fields: Option<Vec<String>>,

    #[serde(flatten)]
    pub expressions: BTreeMap<String, Value>,
}

impl FieldMapping {
    pub fn is_empty(&self) -> bool {
        self.input_field_names.is_none()
            && self.output_field_names.is_none()
            && self.ingest_fields.is_none()
            && self.expressions.is_empty()
    }

    /// Look up a string expression, e.g. `input` -> `$.content`
    pub fn expression(&self, key: &str) -> Option<&str> {
        self.expressions.get(key).and_then(Value::as_str)
    }
}

/// Opaque credential map
///
/// `Debug` never prints values.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(HashMap<String, String>);

impl Credential {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self(entries)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credential {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.keys().map(|k| (k, "***")))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_redacts_values() {
        let credential: Credential = [("secret_key", "hunter2")].into_iter().collect();
        let rendered = format!("{credential:?}");
        assert!(rendered.contains("secret_key"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_with_source_builds_union() {
        let input = BatchIngestionInput::new("idx").with_source("s3", ["s3://a/b"]);
        assert_eq!(input.data_source[DATA_SOURCE_TYPE], "s3");
        assert_eq!(input.data_source[DATA_SOURCE_SOURCE][0], "s3://a/b");
    }

    #[test]
    fn test_deserialize_camel_case_aliases() {
        let json = r#"{
            "indexName": "testIndex",
            "fieldMapping": {
                "input": "$.content",
                "input_field_names": ["chapter", "title"]
            },
            "dataSources": { "type": "s3", "source": ["s3://bucket/a.json"] }
        }"#;
        let input: BatchIngestionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.index_name, "testIndex");
        assert_eq!(input.field_map.expression("input"), Some("$.content"));
        assert_eq!(
            input.field_map.input_field_names.as_deref(),
            Some(&["chapter".to_string(), "title".to_string()][..])
        );
        assert!(input.credential.is_empty());
    }

    #[test]
    fn test_null_data_source_is_empty() {
        let input: BatchIngestionInput =
            serde_json::from_str(r#"{"index_name": "idx", "data_source": null}"#).unwrap();
        assert!(input.data_source.is_empty());
    }

    #[test]
    fn test_index_name_validation() {
        assert!(BatchIngestionInput::new("").validate().is_err());
        assert!(BatchIngestionInput::new("idx").validate().is_ok());
    }
}
