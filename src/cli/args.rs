use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::scopes::Window;

#[derive(Parser)]
#[command(name = "timecraft")]
#[command(about = "Relative-date query scopes and date/time helpers")]
#[command(long_about = "timecraft - relative-date query scopes and date/time helpers

Formats and shifts dates, and renders the SQL a named time window
(today, last week, last month, ...) adds to a query.

QUICK START:
  timecraft format-date \"march 15, 2024\"     Print 2024-03-15
  timecraft ago \"3 days ago\"                 Print 3 days ago
  timecraft add-days 2024-02-28 1             Print 2024-02-29
  timecraft scope last-week --table posts     Show the SQL for last week

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  timecraft <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Log what timecraft is doing (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the config file (defaults to ~/.timecraft/config.yaml)
    #[arg(long, env = "TIMECRAFT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Date column used when a scope names none (overrides the config file)
    #[arg(long, env = "TIMECRAFT_DEFAULT_FIELD", global = true)]
    pub default_field: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format a date as YYYY-MM-DD
    ///
    /// # Examples
    ///
    ///   timecraft format-date "2024-03-15 14:30:00"
    ///   timecraft format-date "march 15, 2024"
    ///   timecraft format-date tomorrow
    #[command(alias = "date")]
    FormatDate {
        /// Date or date-time to format
        value: String,
    },

    /// Format a time as hh:mm:ss AM/PM
    #[command(alias = "time")]
    FormatTime {
        /// Time or date-time to format
        value: String,
    },

    /// Format a date-time as YYYY-MM-DD hh:mm:ss AM/PM
    FormatDateTime {
        /// Date-time to format
        value: String,
    },

    /// Format a date-time as YYYY-MM-DD HH:MM:SS AM/PM
    Human {
        /// Date-time to format
        value: String,
    },

    /// Describe how long ago a date-time was ("3 days ago", "in 2 hours")
    Ago {
        /// Date-time to describe
        value: String,
    },

    /// Print the first second of a day
    StartOfDay {
        /// Date or date-time
        value: String,
    },

    /// Print the last second of a day
    EndOfDay {
        /// Date or date-time
        value: String,
    },

    /// Check whether a date falls on Saturday or Sunday
    Weekend {
        /// Date or date-time
        value: String,
    },

    /// Add days to a date
    ///
    /// # Examples
    ///
    ///   timecraft add-days 2024-02-28 1      # 2024-02-29
    ///   timecraft add-days today -3
    #[command(allow_negative_numbers = true)]
    AddDays {
        /// Date or date-time
        value: String,
        /// Number of days (may be negative)
        #[arg(allow_hyphen_values = true)]
        days: String,
    },

    /// Subtract days from a date
    #[command(alias = "subtract-days", allow_negative_numbers = true)]
    SubDays {
        /// Date or date-time
        value: String,
        /// Number of days (may be negative)
        #[arg(allow_hyphen_values = true)]
        days: String,
    },

    /// Show the query a date scope produces
    ///
    /// Renders the SQL, bound parameters, and constraints that a named
    /// window or an explicit date range adds to a query on TABLE.
    /// With --database the query is also run and matching rows counted.
    ///
    /// # Examples
    ///
    ///   timecraft scope today --table posts
    ///   timecraft scope last-month --table invoices --field issued_on
    ///   timecraft scope --table posts --start 2024-03-01 --end 2024-03-10
    Scope {
        /// Named window
        #[arg(value_enum, required_unless_present = "start")]
        window: Option<Window>,

        /// Table to query
        #[arg(long, short)]
        table: String,

        /// Date column (defaults to the configured default field)
        #[arg(long, short)]
        field: Option<String>,

        /// Start of an explicit date range (inclusive)
        #[arg(long, requires = "end", conflicts_with = "window")]
        start: Option<String>,

        /// End of an explicit date range (inclusive)
        #[arg(long, requires = "start")]
        end: Option<String>,

        /// SQLite database to count matching rows in
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    ///
    /// Redirect to a file or source directly.
    ///
    /// Example: timecraft completions bash > ~/.bash_completion.d/timecraft
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write a default config file if none exists
    Init,
}
