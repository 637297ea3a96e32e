//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and connection strings
//! - Detect empty or duplicated metric names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ToolsConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::config::schema::ToolsConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &ToolsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let aggregator = &config.aggregator;
    match Url::parse(&aggregator.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "aggregator.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "aggregator.base_url",
            format!("invalid URL '{}': {}", aggregator.base_url, e),
        )),
    }

    if aggregator.metrics.is_empty() {
        errors.push(ValidationError::new("aggregator.metrics", "at least one metric is required"));
    }
    let mut seen = HashSet::new();
    for metric in &aggregator.metrics {
        if metric.trim().is_empty() {
            errors.push(ValidationError::new(
                "aggregator.metrics",
                "metric names must not be empty",
            ));
        } else if !seen.insert(metric.as_str()) {
            errors.push(ValidationError::new(
                "aggregator.metrics",
                format!("duplicate metric '{}'", metric),
            ));
        }
    }

    if aggregator.output_path.trim().is_empty() {
        errors.push(ValidationError::new("aggregator.output_path", "must not be empty"));
    }
    if aggregator.request_timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "aggregator.request_timeout_secs",
            "must be greater than 0",
        ));
    }

    if config.session.secret.is_empty() {
        errors.push(ValidationError::new("session.secret", "must not be empty"));
    }

    let store = &config.store;
    if !(store.uri.starts_with("mongodb://") || store.uri.starts_with("mongodb+srv://")) {
        errors.push(ValidationError::new(
            "store.uri",
            "must start with mongodb:// or mongodb+srv://",
        ));
    }
    for (field, value) in [
        ("store.database", &store.database),
        ("store.sessions_collection", &store.sessions_collection),
        ("store.users_collection", &store.users_collection),
        ("store.user_key_field", &store.user_key_field),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ToolsConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = ToolsConfig::default();
        config.aggregator.base_url = "ftp://example.org/".into();
        config.aggregator.metrics = vec!["apis".into(), "apis".into()];
        config.session.secret = String::new();
        config.store.uri = "localhost:27017".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["aggregator.base_url", "aggregator.metrics", "session.secret", "store.uri"]
        );
        assert!(errors[1].to_string().contains("duplicate metric 'apis'"));
    }

    #[test]
    fn test_rejects_unparseable_url_and_zero_timeout() {
        let mut config = ToolsConfig::default();
        config.aggregator.base_url = "not a url".into();
        config.aggregator.request_timeout_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.starts_with("invalid URL"));
    }
}
