//! Aggregation run.

use std::path::PathBuf;

use crate::aggregator::document::{extract_terms, MetricsDocument};
use crate::aggregator::source::{HttpMetricSource, MetricSource};
use crate::aggregator::types::{AggregateResult, AggregateSummary};
use crate::aggregator::writer::write_document;
use crate::config::AggregatorConfig;

/// Fetches every configured metric and writes the combined document.
pub struct Aggregator<S> {
    source: S,
    metrics: Vec<String>,
    output_path: PathBuf,
    pretty: bool,
}

impl Aggregator<HttpMetricSource> {
    /// Aggregator backed by the registry HTTP API.
    pub fn from_config(config: &AggregatorConfig) -> AggregateResult<Self> {
        let source = HttpMetricSource::new(config)?;
        Ok(Self::new(source, config))
    }
}

impl<S: MetricSource> Aggregator<S> {
    pub fn new(source: S, config: &AggregatorConfig) -> Self {
        Self {
            source,
            metrics: config.metrics.clone(),
            output_path: PathBuf::from(&config.output_path),
            pretty: config.pretty,
        }
    }

    /// Fetch all metrics in declaration order. The first failure aborts.
    pub async fn collect(&self) -> AggregateResult<MetricsDocument> {
        let mut document = MetricsDocument::new();

        for metric in &self.metrics {
            let records = self.source.fetch(metric).await?;
            let terms = extract_terms(metric, records)?;
            tracing::info!(metric = %metric, records = terms.len(), "Collected metric");
            document.push(metric.clone(), terms);
        }

        Ok(document)
    }

    /// Collect and write the output file.
    pub async fn run(&self) -> AggregateResult<AggregateSummary> {
        let document = self.collect().await?;
        write_document(&self.output_path, &document, self.pretty)?;

        let summary = AggregateSummary {
            metrics: document.len(),
            records: document.total_records(),
            output_path: self.output_path.display().to_string(),
        };
        tracing::info!(
            metrics = summary.metrics,
            records = summary.records,
            output = %summary.output_path,
            "Metrics document written"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::types::AggregateError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned records and remembers the request order.
    struct FakeSource {
        records: HashMap<String, Vec<Value>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(records: &[(&str, Vec<Value>)]) -> Self {
            Self {
                records: records
                    .iter()
                    .map(|(name, recs)| (name.to_string(), recs.clone()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MetricSource for FakeSource {
        async fn fetch(&self, metric: &str) -> AggregateResult<Vec<Value>> {
            self.calls.lock().unwrap().push(metric.to_string());
            self.records
                .get(metric)
                .cloned()
                .ok_or_else(|| AggregateError::Status {
                    metric: metric.to_string(),
                    status: 404,
                })
        }
    }

    fn config(metrics: &[&str], output: &str) -> AggregatorConfig {
        AggregatorConfig {
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
            output_path: std::env::temp_dir().join(output).display().to_string(),
            ..AggregatorConfig::default()
        }
    }

    #[tokio::test]
    async fn test_collect_keeps_declaration_order() {
        let source = FakeSource::new(&[
            ("subjects", vec![json!({"Terms": ["Biology"]}), json!({"Terms": ["Physics"]})]),
            ("apis", vec![json!({"Terms": ["REST"]})]),
            ("versioning", vec![]),
        ]);
        let config = config(&["versioning", "apis", "subjects"], "unused.json");
        let aggregator = Aggregator::new(source, &config);

        let document = aggregator.collect().await.unwrap();

        assert_eq!(document.metrics().collect::<Vec<_>>(), vec!["versioning", "apis", "subjects"]);
        assert_eq!(document.get("subjects").unwrap().len(), 2);
        assert_eq!(document.get("versioning").unwrap().len(), 0);
        assert_eq!(
            *aggregator.source.calls.lock().unwrap(),
            vec!["versioning", "apis", "subjects"]
        );
    }

    #[tokio::test]
    async fn test_failure_stops_run_and_writes_nothing() {
        let output = "muncher_tools_engine_failure.json";
        let source = FakeSource::new(&[("apis", vec![json!({"Terms": []})])]);
        let aggregator = Aggregator::new(source, &config(&["apis", "missing", "software"], output));

        let err = aggregator.run().await.unwrap_err();

        assert!(matches!(err, AggregateError::Status { status: 404, .. }));
        assert_eq!(*aggregator.source.calls.lock().unwrap(), vec!["apis", "missing"]);
        assert!(!std::env::temp_dir().join(output).exists());
    }

    #[tokio::test]
    async fn test_run_writes_summary() {
        let output = "muncher_tools_engine_run.json";
        let source = FakeSource::new(&[
            ("apis", vec![json!({"Terms": ["REST"]}), json!({"Terms": ["OAI-PMH"]})]),
            ("software", vec![json!({"Terms": ["CKAN"]})]),
        ]);
        let aggregator = Aggregator::new(source, &config(&["apis", "software"], output));

        let summary = aggregator.run().await.unwrap();
        assert_eq!(summary.metrics, 2);
        assert_eq!(summary.records, 3);

        let path = std::env::temp_dir().join(output);
        let written: MetricsDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.get("apis").unwrap(), &[json!(["REST"]), json!(["OAI-PMH"])]);
        std::fs::remove_file(&path).unwrap_or_default();
    }
}
