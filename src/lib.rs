//! timecraft - relative-date query scopes and date/time helpers
//!
//! This crate narrows queries to named time windows (today, last week,
//! last month, ...) over a configurable date column, and provides small
//! helpers for formatting and shifting dates.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod scopes;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use config::{Config, ScopeConfig};
pub use error::TimeCraftError;
pub use scopes::{DateQuery, DateScoped, DateScopes, SqlQuery, Window};
