//! Command-line interface entry point for `StudyPlanner`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::plan::PlanArgs;
use log::{error, info, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;
use study_planner::config::Config;
use study_planner::shared::logger::{self, parse_level, LogOptions};

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(LevelFilter::from)
        .or_else(|| parse_level(&config.logging.level))
        .unwrap_or(LevelFilter::Warn);
    if args.debug_flag {
        level = level.max(LevelFilter::Debug);
    }

    let verbose = args.verbose || config.logging.verbose;

    // CLI flag wins, otherwise use config logging.file if set
    let file = args.log_file.clone().or_else(|| {
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file))
    });

    let options = LogOptions {
        level,
        file,
        verbose,
    };
    match logger::init(&options) {
        Ok(()) => {
            if let Some(path) = &options.file {
                info!("File logging initialized at: {}", path.display());
            }
        }
        Err(e) => eprintln!("✗ Failed to initialize logging: {e}"),
    }

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Timetable {
            input_file,
            output,
            report,
        } => commands::timetable::run(&input_file, output.as_deref(), report.as_deref(), &config),
        Command::Plan {
            subjects,
            difficulty,
            completed,
            days,
            hours,
            followup_subjects,
            followup_difficulty,
            output,
            report,
        } => commands::plan::run(
            &PlanArgs {
                subjects: &subjects,
                difficulty: &difficulty,
                completed: &completed,
                days,
                hours,
                followup_subjects: &followup_subjects,
                followup_difficulty: &followup_difficulty,
                output: output.as_deref(),
                report: report.as_deref(),
            },
            &config,
        ),
        Command::Remind {
            timetable,
            subscriptions,
            ledger,
            at,
        } => commands::remind::run(&timetable, &subscriptions, ledger.as_deref(), at, &config),
        Command::Subscribe {
            subscriptions,
            endpoint,
        } => commands::remind::subscribe(&subscriptions, &endpoint),
        Command::Suggest {
            tasks,
            duration,
            date,
            check,
        } => commands::suggest::run(&tasks, duration, date, check.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            ExitCode::FAILURE
        }
    }
}
