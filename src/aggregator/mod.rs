//! Registry metric aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! configured metric names (declaration order)
//!     → source.rs (GET <base_url><metric>, charset-aware decode)
//!     → document.rs (extract "Terms" from each record)
//!     → MetricsDocument { metric → [terms, ...] }
//!     → writer.rs (temp file + rename)
//! ```
//!
//! # Design Decisions
//! - Fetches run one after another; output order is declaration order
//! - Any failure aborts the run before the output file is touched

pub mod catalog;
pub mod document;
pub mod engine;
pub mod source;
pub mod types;
pub mod writer;

pub use catalog::DEFAULT_METRICS;
pub use document::{extract_terms, MetricsDocument};
pub use engine::Aggregator;
pub use source::{HttpMetricSource, MetricSource};
pub use types::{AggregateError, AggregateResult, AggregateSummary};
pub use writer::write_document;
