//! Log output setup
//!
//! Lines look like `[2024-01-02 03:04:05] WARNING:rt2600ac_cli::sequence:message`
//! and are written to stdout, interleaved with the command output.

use anyhow::{Result, anyhow};
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Logging context for one process run.
///
/// Built from the parsed verbosity and installed once in `main`, before any
/// router call. The threshold comes from the flags alone.
#[derive(Debug, Clone, Copy)]
pub struct Logging {
    level: Level,
}

impl Logging {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Install the global subscriber. Fails if one is already set.
    pub fn install(&self) -> Result<()> {
        tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_writer(std::io::stdout)
            .with_ansi(false)
            .event_format(LineFormat)
            .try_init()
            .map_err(|e| anyhow!("failed to install logger: {e}"))
    }
}

/// Level names as printed in log lines
pub fn level_name(level: &Level) -> &'static str {
    if *level == Level::ERROR {
        "ERROR"
    } else if *level == Level::WARN {
        "WARNING"
    } else if *level == Level::INFO {
        "INFO"
    } else if *level == Level::DEBUG {
        "DEBUG"
    } else {
        "TRACE"
    }
}

/// `[timestamp] LEVEL:target:`
pub fn line_prefix(timestamp: &str, level: &Level, target: &str) -> String {
    format!("[{timestamp}] {}:{target}:", level_name(level))
}

struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        write!(
            writer,
            "{}",
            line_prefix(&timestamp, metadata.level(), metadata.target())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
