use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use timecraft::cli::args::{Cli, Commands};
use timecraft::cli::commands;
use timecraft::cli::logging::setup_logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {e:#}", "error".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let format = cli.output;
    let config_path = cli.config.as_deref();
    let default_field = cli.default_field.as_deref();

    let output = match cli.command {
        Commands::FormatDate { value } => commands::format_date(&value, format)?,
        Commands::FormatTime { value } => commands::format_time(&value, format)?,
        Commands::FormatDateTime { value } => commands::format_date_time(&value, format)?,
        Commands::Human { value } => commands::human(&value, format)?,
        Commands::Ago { value } => commands::ago(&value, format)?,
        Commands::StartOfDay { value } => commands::start_of_day(&value, format)?,
        Commands::EndOfDay { value } => commands::end_of_day(&value, format)?,
        Commands::Weekend { value } => commands::weekend(&value, format)?,
        Commands::AddDays { value, days } => commands::add_days(&value, &days, format)?,
        Commands::SubDays { value, days } => commands::sub_days(&value, &days, format)?,
        Commands::Scope {
            window,
            table,
            field,
            start,
            end,
            database,
        } => commands::scope(
            &commands::load_config(config_path, default_field)?.scopes,
            window,
            &table,
            field.as_deref(),
            start.as_deref().zip(end.as_deref()),
            database.as_deref(),
            format,
        )?,
        Commands::Config { command } => {
            commands::config(command, config_path, default_field, format)?
        },
        Commands::Completions { shell, install } => commands::completions(shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
