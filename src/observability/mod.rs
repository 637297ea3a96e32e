//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! aggregator / session subsystems
//!     → tracing events (metric name, record counts, lookup outcomes)
//!     → logging.rs subscriber (env-filter, stderr)
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of formatted messages
//! - Cookies and secrets are never logged

pub mod logging;

pub use logging::init_logging;
