//! Configuration schema definitions.
//!
//! Every section has defaults for the public re3data registry and a local
//! MongoDB, so an empty (or absent) config file is a working config.

use serde::{Deserialize, Serialize};

use crate::aggregator::catalog::DEFAULT_METRICS;

/// Root configuration for both tools.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ToolsConfig {
    /// Registry metric aggregation settings.
    pub aggregator: AggregatorConfig,

    /// Cookie signing settings.
    pub session: SessionConfig,

    /// Session/user document store settings.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Metric aggregator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Base URL; each metric name is appended to it verbatim.
    pub base_url: String,

    /// Metric names to fetch, in output order.
    pub metrics: Vec<String>,

    /// Destination file for the combined JSON document.
    pub output_path: String,

    /// Pretty-print the output document.
    pub pretty: bool,

    /// Per-request timeout. `None` keeps the HTTP client default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.re3data.org/metrics/data/".to_string(),
            metrics: DEFAULT_METRICS.iter().map(|m| m.to_string()).collect(),
            output_path: "re3data-metrics.json".to_string(),
            pretty: false,
            request_timeout_secs: None,
        }
    }
}

impl AggregatorConfig {
    /// Base URL with a guaranteed trailing slash.
    pub fn normalized_base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }
}

/// Cookie signing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Shared secret used by the web application to sign session cookies.
    pub secret: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // Secret of the o2r muncher deployment; override for other apps.
            secret: "o2r".to_string(),
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// MongoDB connection string.
    pub uri: String,

    /// Database holding both collections.
    pub database: String,

    /// Collection of session documents, keyed by `_id`.
    pub sessions_collection: String,

    /// Collection of user documents.
    pub users_collection: String,

    /// Field of the user document that holds the user identifier.
    pub user_key_field: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017/".to_string(),
            database: "muncher".to_string(),
            sessions_collection: "sessions".to_string(),
            users_collection: "users".to_string(),
            user_key_field: "orcid".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
