//! Walk through a Synology SRM router's web API.
//!
//! Logs in with the configured account and prints the API discovery
//! listing followed by a fixed set of read-only calls (certificates, one
//! known host, external IP, utilization, topology, Wi-Fi clients).
//!
//! - `cli`: argument and environment parsing
//! - `logging`: log line format and subscriber setup
//! - `render`: discovery lines and sorted, indented JSON
//! - `sequence`: the ordered call plan and its executor

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod cli;
pub mod logging;
pub mod render;
pub mod sequence;

pub use cli::{Cli, ConnectionArgs};
pub use logging::Logging;
pub use sequence::{CallPlan, Step, execute_plan};

use anyhow::{Context, Result};
use rt2600ac_client::SrmClient;
use std::io::Write;

/// Build a session from `cli` and run the standard call plan against it.
pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    // Certificate checking is already off in the config unless
    // `--verify-tls` was given, so the HTTP client is built once.
    let client = SrmClient::new(cli.connection.client_config())
        .context("failed to set up router client")?;

    tracing::info!("Web API base URL: {}", client.base_url());

    let plan = CallPlan::standard(&cli.connection.lookup_hostname);
    execute_plan(&client, &plan, out).await
}
