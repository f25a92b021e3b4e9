//! Diagnostic logging for the binary.
//!
//! The library only emits `tracing` events; this installs the subscriber
//! that prints them to stderr.

use colored::Colorize;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::error::TimeCraftError;

/// Renders events as `[LEVEL] message key=value ...`.
struct LevelFormatter;

impl<S, N> FormatEvent<S, N> for LevelFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let label = match *event.metadata().level() {
            Level::TRACE => "[TRACE]".magenta(),
            Level::DEBUG => "[DEBUG]".blue(),
            Level::INFO => "[INFO]".green(),
            Level::WARN => "[WARN]".yellow(),
            Level::ERROR => "[ERROR]".red(),
        };
        write!(writer, "{label} ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Map `-v` occurrences to a level: warnings by default, then debug, then trace.
#[must_use]
pub const fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins over `verbose` when set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn setup_logging(verbose: u8) -> Result<(), TimeCraftError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("timecraft={}", level_for(verbose))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(LevelFormatter)
        .try_init()
        .map_err(|e| TimeCraftError::Config(format!("Failed to set up logging: {e}")))
}
