//! The combined metrics document.
//!
//! A JSON object mapping each metric name to the list of `Terms` values of its
//! records. Keys keep insertion order on both serialization and
//! deserialization, whatever map type `serde_json` is built with.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::aggregator::catalog::TERMS_FIELD;
use crate::aggregator::types::{AggregateError, AggregateResult};

/// Ordered mapping of metric name to term lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsDocument {
    entries: Vec<(String, Vec<Value>)>,
}

impl MetricsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a metric. Entries are emitted in push order.
    pub fn push(&mut self, metric: impl Into<String>, terms: Vec<Value>) {
        self.entries.push((metric.into(), terms));
    }

    /// Term lists of a metric, if present.
    pub fn get(&self, metric: &str) -> Option<&[Value]> {
        self.entries
            .iter()
            .find(|(name, _)| name == metric)
            .map(|(_, terms)| terms.as_slice())
    }

    /// Metric names in document order.
    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.entries
            .iter()
            .map(|(name, terms)| (name.as_str(), terms.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of term lists across all metrics.
    pub fn total_records(&self) -> usize {
        self.entries.iter().map(|(_, terms)| terms.len()).sum()
    }
}

impl Serialize for MetricsDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (metric, terms) in &self.entries {
            map.serialize_entry(metric, terms)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MetricsDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = MetricsDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of metric names to term lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut document = MetricsDocument::new();
                while let Some((metric, terms)) = access.next_entry::<String, Vec<Value>>()? {
                    document.push(metric, terms);
                }
                Ok(document)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// Pull the `Terms` field out of every record, preserving record order.
pub fn extract_terms(metric: &str, records: Vec<Value>) -> AggregateResult<Vec<Value>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            record
                .as_object_mut()
                .and_then(|fields| fields.remove(TERMS_FIELD))
                .ok_or_else(|| AggregateError::MissingTerms {
                    metric: metric.to_string(),
                    index,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_in_push_order() {
        let mut document = MetricsDocument::new();
        document.push("versioning", vec![json!(["yes"])]);
        document.push("apis", vec![json!(["REST"]), json!(["SOAP"])]);

        let text = serde_json::to_string(&document).unwrap();
        assert_eq!(text, r#"{"versioning":[["yes"]],"apis":[["REST"],["SOAP"]]}"#);
    }

    #[test]
    fn test_deserialize_recovers_order_and_content() {
        let text = r#"{"subjects":[["Biology"]],"apis":[["REST"],["FTP"]],"keywords":[]}"#;
        let document: MetricsDocument = serde_json::from_str(text).unwrap();

        assert_eq!(document.metrics().collect::<Vec<_>>(), vec!["subjects", "apis", "keywords"]);
        assert_eq!(document.get("apis").unwrap().len(), 2);
        assert_eq!(document.total_records(), 3);
        assert_eq!(serde_json::to_string(&document).unwrap(), text);
    }

    #[test]
    fn test_extract_terms_keeps_values_verbatim() {
        let records = vec![
            json!({"Terms": ["DOI", "ARK"], "Count": 12}),
            json!({"Terms": "single"}),
        ];
        let terms = extract_terms("pidSystems", records).unwrap();
        assert_eq!(terms, vec![json!(["DOI", "ARK"]), json!("single")]);
    }

    #[test]
    fn test_extract_terms_missing_field() {
        let records = vec![json!({"Terms": []}), json!({"terms": []})];
        let err = extract_terms("types", records).unwrap_err();
        assert!(matches!(err, AggregateError::MissingTerms { index: 1, .. }));
    }

    #[test]
    fn test_extract_terms_non_object_record() {
        let err = extract_terms("types", vec![json!(["not", "a", "record"])]).unwrap_err();
        assert!(matches!(err, AggregateError::MissingTerms { index: 0, .. }));
    }
}
