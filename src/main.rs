//! muncher-tools
//!
//! Two independent utilities sharing one configuration file:
//!
//! ```text
//!   aggregate   re3data /metrics/data/<metric> ──▶ re3data-metrics.json
//!   sign        session ID + secret ──▶ s:<id>.<sig>
//!   verify      cookie + secret ──▶ valid / invalid
//!   resolve     cookie ──▶ sessions._id ──▶ passport.user ──▶ users.orcid
//! ```

use std::process::ExitCode;

use clap::Parser;

use muncher_tools::cli::{execute, Cli};
use muncher_tools::observability::init_logging;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.effective_config()?;

    init_logging(&config.observability.log_level);

    let mut stdout = std::io::stdout();
    if execute(cli.command, &config, &mut stdout).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
