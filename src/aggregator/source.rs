//! Metric record sources.
//!
//! # Responsibilities
//! - Fetch the record array for one metric name
//! - Decode the body with the charset the server declares
//!
//! # Design Decisions
//! - One GET per metric, no retries
//! - No timeout unless configured; otherwise the reqwest default applies
//! - Non-success statuses are failures, not empty results

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::aggregator::types::{json_kind, AggregateError, AggregateResult};
use crate::config::AggregatorConfig;

/// Something that can produce the raw records of a metric.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Fetch all records published for `metric`.
    async fn fetch(&self, metric: &str) -> AggregateResult<Vec<Value>>;
}

/// Fetches metrics from the registry over HTTP.
#[derive(Debug, Clone)]
pub struct HttpMetricSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetricSource {
    /// Build a source for the configured base URL.
    pub fn new(config: &AggregatorConfig) -> AggregateResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("muncher-tools/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(AggregateError::Client)?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url(),
        })
    }

    /// URL of a single metric.
    pub fn metric_url(&self, metric: &str) -> String {
        format!("{}{}", self.base_url, metric)
    }
}

#[async_trait]
impl MetricSource for HttpMetricSource {
    async fn fetch(&self, metric: &str) -> AggregateResult<Vec<Value>> {
        let url = self.metric_url(metric);
        tracing::debug!(metric = %metric, url = %url, "Fetching metric");

        let response = self.client.get(&url).send().await.map_err(|source| {
            AggregateError::Http {
                metric: metric.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AggregateError::Status {
                metric: metric.to_string(),
                status: status.as_u16(),
            });
        }

        // text() honours the Content-Type charset and falls back to UTF-8
        let body = response.text().await.map_err(|source| AggregateError::Http {
            metric: metric.to_string(),
            source,
        })?;

        parse_records(metric, &body)
    }
}

/// Parse a response body into its array of records.
pub fn parse_records(metric: &str, body: &str) -> AggregateResult<Vec<Value>> {
    let value: Value = serde_json::from_str(body).map_err(|source| AggregateError::Decode {
        metric: metric.to_string(),
        source,
    })?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(AggregateError::UnexpectedShape {
            metric: metric.to_string(),
            found: json_kind(&other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_array() {
        let body = r#"[{"Terms": ["REST"]}, {"Terms": ["SOAP"]}]"#;
        let records = parse_records("apis", body).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_records_rejects_object() {
        let err = parse_records("apis", r#"{"Terms": []}"#).unwrap_err();
        assert!(matches!(err, AggregateError::UnexpectedShape { found: "an object", .. }));
    }

    #[test]
    fn test_parse_records_rejects_garbage() {
        let err = parse_records("apis", "<html>").unwrap_err();
        assert!(matches!(err, AggregateError::Decode { ref metric, .. } if metric == "apis"));
    }

    #[test]
    fn test_metric_url_appends_name() {
        let mut config = AggregatorConfig::default();
        config.base_url = "http://127.0.0.1:1/metrics/data".into();
        let source = HttpMetricSource::new(&config).unwrap();
        assert_eq!(source.metric_url("subjects"), "http://127.0.0.1:1/metrics/data/subjects");
    }
}
