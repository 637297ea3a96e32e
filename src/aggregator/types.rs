//! Aggregator error definitions.

use thiserror::Error;

/// Errors that abort an aggregation run.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure (connect, TLS, body read).
    #[error("request for metric '{metric}' failed: {source}")]
    Http {
        metric: String,
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a non-success status.
    #[error("metric '{metric}' returned HTTP {status}")]
    Status { metric: String, status: u16 },

    /// The body was not valid JSON.
    #[error("metric '{metric}' returned invalid JSON: {source}")]
    Decode {
        metric: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body was JSON but not an array of records.
    #[error("metric '{metric}' returned {found}, expected an array of records")]
    UnexpectedShape { metric: String, found: &'static str },

    /// A record had no `Terms` field.
    #[error("record {index} of metric '{metric}' has no Terms field")]
    MissingTerms { metric: String, index: usize },

    /// Writing the output document failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the output document failed.
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for aggregator operations.
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSummary {
    /// Number of metrics written.
    pub metrics: usize,
    /// Total number of term lists across all metrics.
    pub records: usize,
    /// Where the document was written.
    pub output_path: String,
}

/// JSON kind name for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
