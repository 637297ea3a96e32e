//! re3data metric vocabulary aggregation and session cookie verification.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod observability;
pub mod session;

pub use aggregator::{Aggregator, MetricsDocument};
pub use config::ToolsConfig;
pub use session::{sign_cookie, verify, SessionResolver};
