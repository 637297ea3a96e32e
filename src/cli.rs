//! Command-line front end.
//!
//! # Responsibilities
//! - Parse arguments into `Cli`
//! - Merge command-line overrides into the file config, then validate once
//! - Dispatch each subcommand and report success through the return value
//!
//! # Design Decisions
//! - Command output goes to the supplied writer; diagnostics go to stderr
//! - `Ok(false)` means "ran, but the answer is no" (exit status 1)

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::aggregator::Aggregator;
use crate::config::{read_config, validate_config, ConfigError, ToolsConfig};
use crate::session::{self, DocumentStore, MemoryStore, MongoStore, SessionResolver};

#[derive(Debug, Parser)]
#[command(name = "muncher-tools")]
#[command(about = "re3data metric aggregation and session cookie tools", long_about = None)]
pub struct Cli {
    /// TOML configuration file; built-in defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch all registry metrics and write the combined JSON document
    Aggregate {
        /// Output file (overrides config)
        #[arg(short, long)]
        output: Option<String>,

        /// Registry base URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,

        /// Pretty-print the output document
        #[arg(long)]
        pretty: bool,
    },
    /// Print the signed cookie value for a session ID
    Sign {
        session_id: String,

        #[arg(short, long)]
        secret: Option<String>,
    },
    /// Check a cookie's signature
    Verify {
        cookie: String,

        #[arg(short, long)]
        secret: Option<String>,
    },
    /// Print the user document a cookie belongs to
    Resolve {
        cookie: String,

        #[arg(short, long)]
        secret: Option<String>,

        /// Read sessions and users from a JSON file instead of MongoDB
        #[arg(long)]
        store_file: Option<PathBuf>,
    },
}

impl Cli {
    /// File config (or defaults) with this invocation's overrides, validated.
    pub fn effective_config(&self) -> Result<ToolsConfig, ConfigError> {
        let mut config = read_config(self.config.as_deref())?;
        self.command.apply_overrides(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

impl Commands {
    fn apply_overrides(&self, config: &mut ToolsConfig) {
        match self {
            Commands::Aggregate {
                output,
                base_url,
                pretty,
            } => {
                if let Some(output) = output {
                    config.aggregator.output_path = output.clone();
                }
                if let Some(base_url) = base_url {
                    config.aggregator.base_url = base_url.clone();
                }
                config.aggregator.pretty |= *pretty;
            }
            Commands::Sign { secret, .. }
            | Commands::Verify { secret, .. }
            | Commands::Resolve { secret, .. } => {
                if let Some(secret) = secret {
                    config.session.secret = secret.clone();
                }
            }
        }
    }
}

/// Run one subcommand against an already merged config.
pub async fn execute<W: Write>(
    command: Commands,
    config: &ToolsConfig,
    out: &mut W,
) -> Result<bool, Box<dyn Error>> {
    match command {
        Commands::Aggregate { .. } => {
            tracing::info!(
                base_url = %config.aggregator.base_url,
                metrics = config.aggregator.metrics.len(),
                "Starting aggregation"
            );
            let summary = Aggregator::from_config(&config.aggregator)?.run().await?;
            writeln!(
                out,
                "Wrote {} metrics ({} term lists) to {}",
                summary.metrics, summary.records, summary.output_path
            )?;
            Ok(true)
        }
        Commands::Sign { session_id, .. } => {
            if session_id.contains('.') {
                return Err(format!("session ID '{}' must not contain '.'", session_id).into());
            }
            writeln!(out, "{}", session::sign_cookie(&session_id, &config.session.secret))?;
            Ok(true)
        }
        Commands::Verify { cookie, .. } => {
            let valid = session::verify(&cookie, &config.session.secret);
            writeln!(out, "{}", if valid { "valid" } else { "invalid" })?;
            Ok(valid)
        }
        Commands::Resolve {
            cookie, store_file, ..
        } => {
            let secret = config.session.secret.clone();
            match store_file {
                Some(path) => {
                    let store = MemoryStore::load_from_file(&path)?;
                    let resolver = SessionResolver::new(store, secret, &config.store);
                    print_user(resolver, &cookie, out).await
                }
                None => {
                    let store = MongoStore::connect(&config.store).await?;
                    let resolver = SessionResolver::new(store, secret, &config.store);
                    print_user(resolver, &cookie, out).await
                }
            }
        }
    }
}

async fn print_user<S: DocumentStore, W: Write>(
    resolver: SessionResolver<S>,
    cookie: &str,
    out: &mut W,
) -> Result<bool, Box<dyn Error>> {
    match resolver.resolve(cookie).await? {
        Some(user) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&user)?)?;
            Ok(true)
        }
        None => {
            eprintln!("Error: cookie signature is invalid");
            Ok(false)
        }
    }
}
