//! rt2600ac binary entry point.
//!
//! Parses arguments, installs logging, then hands over to
//! [`rt2600ac_cli::run`]. Any error ends the process with a nonzero status.

use anyhow::Result;
use clap::Parser;
use rt2600ac_cli::{Cli, Logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = Logging::new(cli.log_level());
    logging.install()?;

    tracing::debug!("Starting with log level {}", logging.level());

    rt2600ac_cli::run(&cli, &mut std::io::stdout()).await?;

    tracing::info!("Script ends here");
    Ok(())
}
