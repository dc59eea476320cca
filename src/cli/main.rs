//! Command-line interface entry point for `ectstracker`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use ects_tracker::config::Config;
use ects_tracker::info;
use ects_tracker::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fall back to warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }
    set_level(level);

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }

    let config_log_path = (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Status => commands::status::run(&config),
        Command::Toggle { id } => commands::courses::toggle(&config, &id),
        Command::Grade { id, grade } => commands::courses::grade(&config, &id, &grade),
        Command::Elective { subcommand } => commands::electives::run_elective(&config, subcommand),
        Command::Free { subcommand } => commands::electives::run_free(&config, subcommand),
        Command::MathToggle => commands::courses::math_toggle(&config),
        Command::Export { output } => commands::snapshot::export(&config, output.as_deref()),
        Command::Import { file } => commands::snapshot::import(&config, &file),
        Command::Report { format, output } => {
            commands::report::run(&config, &format, output.as_deref())
        }
    };

    if let Err(message) = result {
        eprintln!("✗ {message}");
        std::process::exit(1);
    }
}
