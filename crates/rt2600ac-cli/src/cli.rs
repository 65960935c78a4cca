//! Command-line arguments.
//!
//! Connection settings can be given as options or through environment
//! variables (`RT2600AC_HOST`, `RT2600AC_PASSWORD`, ...). Only the password
//! has no default.
//!
//! Verbosity: no flag logs warnings and above, `-v` adds info, `-vv` or
//! `--very-verbose` adds debug. When several are given the most verbose
//! one wins.

use clap::{ArgAction, Args, Parser};
use rt2600ac_client::ClientConfig;
use std::time::Duration;
use tracing::Level;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "rt2600ac",
    about = "Just a demonstration of the Synology Router API wrapper",
    version
)]
pub struct Cli {
    /// Set loglevel to INFO (-vv for DEBUG)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Set loglevel to DEBUG
    #[arg(long = "very-verbose")]
    pub very_verbose: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl Cli {
    /// Log threshold selected by the verbosity flags
    pub fn log_level(&self) -> Level {
        if self.very_verbose || self.verbose >= 2 {
            Level::DEBUG
        } else if self.verbose == 1 {
            Level::INFO
        } else {
            Level::WARN
        }
    }
}

/// Router connection options.
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Router address
    #[arg(long, env = "RT2600AC_HOST", default_value = "192.168.1.1")]
    pub host: String,

    /// Web API port
    #[arg(long, env = "RT2600AC_PORT", default_value_t = 8001)]
    pub port: u16,

    /// Use plain HTTP instead of HTTPS
    #[arg(long, env = "RT2600AC_HTTP")]
    pub http: bool,

    /// Account to log in with
    #[arg(long, env = "RT2600AC_USERNAME", default_value = "admin")]
    pub username: String,

    /// Account password
    #[arg(long, env = "RT2600AC_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Verify the router's TLS certificate (self-signed by default, so off)
    #[arg(long, env = "RT2600AC_VERIFY_TLS")]
    pub verify_tls: bool,

    /// Hostname to look up among known network devices
    #[arg(
        long,
        env = "RT2600AC_LOOKUP_HOSTNAME",
        default_value = "DESKTOP-6AVJ2SV"
    )]
    pub lookup_hostname: String,

    /// Request timeout in seconds
    #[arg(long, env = "RT2600AC_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,
}

impl ConnectionArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            host: self.host.clone(),
            port: self.port,
            https: !self.http,
            username: self.username.clone(),
            password: self.password.clone(),
            verify_tls: self.verify_tls,
            request_timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        }
    }
}
