//! Command-line front end.

pub mod args;
pub mod commands;
pub mod logging;
