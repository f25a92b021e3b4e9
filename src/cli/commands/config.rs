//! The config command and config loading for the binary.

use std::path::Path;

use tracing::debug;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::TimeCraftError;
use crate::output::format_config;

/// Resolve config paths: around `path` if given, else `~/.timecraft/`.
///
/// # Errors
///
/// Returns an error if no path is given and the home directory is unknown.
pub fn config_paths(path: Option<&Path>) -> Result<Paths, TimeCraftError> {
    path.map_or_else(Paths::new, |path| Ok(Paths::for_config_file(path)))
}

/// Load the config file, then apply a default-field override.
///
/// A blank override is ignored.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_config(
    path: Option<&Path>,
    default_field: Option<&str>,
) -> Result<Config, TimeCraftError> {
    let paths = config_paths(path)?;
    let mut config = Config::load_from(&paths)?;
    debug!(
        path = %paths.config_file.display(),
        field = %config.scopes.default_field,
        "loaded config"
    );

    if let Some(field) = default_field.map(str::trim).filter(|f| !f.is_empty()) {
        debug!(field, "overriding default field");
        config.scopes.default_field = field.to_string();
    }

    Ok(config)
}

/// Execute config subcommands.
///
/// `show` loads the file (plus the override); `init` never reads it.
///
/// # Errors
///
/// Returns an error if the config file cannot be parsed or written, or
/// output formatting fails.
pub fn config(
    cmd: ConfigCommands,
    path: Option<&Path>,
    default_field: Option<&str>,
    format: OutputFormat,
) -> Result<String, TimeCraftError> {
    let paths = config_paths(path)?;

    match cmd {
        ConfigCommands::Show => {
            let effective = load_config(path, default_field)?;
            format_config(&effective, &paths.config_file, format)
        },
        ConfigCommands::Init => {
            if paths.config_file.exists() {
                return Ok(format!(
                    "Config already exists at {}",
                    paths.config_file.display()
                ));
            }
            Config::default().save_to(&paths)?;
            Ok(format!(
                "Wrote default config to {}",
                paths.config_file.display()
            ))
        },
    }
}
