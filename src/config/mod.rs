//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ToolsConfig (validated, immutable)
//!     → CLI overrides (--secret, --output, ...)
//!     → handed to the aggregator / session verifier
//! ```
//!
//! # Design Decisions
//! - All fields have defaults matching the registry and store the tools target
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, read_config, ConfigError};
pub use schema::{AggregatorConfig, ObservabilityConfig, SessionConfig, StoreConfig, ToolsConfig};
pub use validation::{validate_config, ValidationError};
