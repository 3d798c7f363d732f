//! Command-line interface entry point for `StudyFlow`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use studyflow::config::Config;
use studyflow::info;
use studyflow::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Keep the on-disk config separate so `config set` never saves CLI overrides
    let mut stored = Config::load();
    let defaults = Config::from_defaults();
    let mut config = stored.clone();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins, then config logging.level, then warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &config, &mut stored, &defaults);
        }
        Command::Grades { course } => commands::grades::run(course, &config),
        Command::Courses { search } => commands::courses::run(search.as_deref(), &config),
        Command::Dashboard { today } => commands::dashboard::run(today.as_deref(), &config),
        Command::Assignments {
            course,
            search,
            status,
            action,
        } => commands::assignments::run(course, search.as_deref(), status, action, &config),
        Command::Calendar { date } => commands::calendar::run(date.as_deref(), &config),
        Command::Report {
            output,
            format,
            today,
        } => commands::report::run(
            output.as_deref(),
            format.as_deref(),
            today.as_deref(),
            &config,
        ),
    }
}
