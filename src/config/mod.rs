//! Configuration management for timecraft.
//!
//! This module handles loading and saving configuration from `~/.timecraft/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, ScopeConfig};
