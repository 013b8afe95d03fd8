//! CLI argument definitions for `StudyPlanner`

use chrono::{NaiveDate, NaiveDateTime};
use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use study_planner::config::ConfigOverrides;
use study_planner::core::models::Difficulty;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `log::LevelFilter`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
    /// Trace-level logging
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
            LogLevelArg::Trace => Self::Trace,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        write!(f, "{as_str}")
    }
}

/// Parse a `SUBJECT=LEVEL` pair
fn parse_difficulty_pair(value: &str) -> Result<(String, Difficulty), String> {
    let (subject, level) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SUBJECT=LEVEL, got '{value}'"))?;
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(format!("missing subject in '{value}'"));
    }
    Ok((subject.to_string(), level.parse()?))
}

/// Parse a local date and time, `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM`
fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value.trim(), fmt).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DD HH:MM, got '{value}'"))
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `hours_per_day`, `subjects`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Turn OCR text of a weekly timetable into class periods.
    Timetable {
        /// Text file holding the OCR output
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Output JSON path (defaults to the configured timetables directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also generate a report: markdown (md), html, or json
        #[arg(long, value_name = "FORMAT")]
        report: Option<String>,
    },
    /// Build a weighted study plan.
    Plan {
        /// Subjects in priority order, highest first
        #[arg(long, value_name = "SUBJECTS", value_delimiter = ',', required = true)]
        subjects: Vec<String>,

        /// Subject difficulty as SUBJECT=easy|medium|hard (repeatable; default medium)
        #[arg(long, value_name = "SUBJECT=LEVEL", value_parser = parse_difficulty_pair)]
        difficulty: Vec<(String, Difficulty)>,

        /// Subjects already mastered
        #[arg(long, value_name = "SUBJECTS", value_delimiter = ',')]
        completed: Vec<String>,

        /// Total number of days to plan
        #[arg(long, value_name = "DAYS")]
        days: u32,

        /// Study hours per day (defaults to config `hours_per_day`)
        #[arg(long, value_name = "HOURS")]
        hours: Option<f64>,

        /// Priority order for the follow-up phase (defaults to --subjects)
        #[arg(long, value_name = "SUBJECTS", value_delimiter = ',')]
        followup_subjects: Vec<String>,

        /// Difficulty overrides for the follow-up phase
        #[arg(long, value_name = "SUBJECT=LEVEL", value_parser = parse_difficulty_pair)]
        followup_difficulty: Vec<(String, Difficulty)>,

        /// Output JSON path (defaults to the configured plans directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also generate a report: markdown (md), html, or json
        #[arg(long, value_name = "FORMAT")]
        report: Option<String>,
    },
    /// Decide which class reminders are due now.
    Remind {
        /// Parsed timetable JSON
        #[arg(long, value_name = "FILE")]
        timetable: PathBuf,

        /// Subscriptions JSON
        #[arg(long, value_name = "FILE")]
        subscriptions: PathBuf,

        /// Sent-reminder ledger, read and written back
        #[arg(long, value_name = "FILE")]
        ledger: Option<PathBuf>,

        /// Evaluate at this local time instead of now (YYYY-MM-DD HH:MM)
        #[arg(long, value_name = "DATETIME", value_parser = parse_datetime)]
        at: Option<NaiveDateTime>,
    },
    /// Register a push subscription.
    Subscribe {
        /// Subscriptions JSON, created if missing
        #[arg(long, value_name = "FILE")]
        subscriptions: PathBuf,

        /// Push service endpoint
        #[arg(value_name = "ENDPOINT")]
        endpoint: String,
    },
    /// Suggest free time slots for a task.
    Suggest {
        /// Tasks JSON
        #[arg(long, value_name = "FILE")]
        tasks: PathBuf,

        /// Task length in hours
        #[arg(long, value_name = "HOURS")]
        duration: f64,

        /// Day to plan (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Report scheduling conflicts for this task id
        #[arg(long, value_name = "TASK_ID")]
        check: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "studyplanner",
    about = "StudyPlanner command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level. Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config timetables directory
    #[arg(long = "timetables-dir", value_name = "DIR")]
    pub timetables_dir: Option<PathBuf>,

    /// Override config plans directory
    #[arg(long = "plans-dir", value_name = "DIR")]
    pub plans_dir: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config daily study hours
    #[arg(long = "config-hours-per-day", value_name = "HOURS")]
    pub config_hours_per_day: Option<f64>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            timetables_dir: self.timetables_dir.as_ref().map(path_string),
            plans_dir: self.plans_dir.as_ref().map(path_string),
            reports_dir: self.reports_dir.as_ref().map(path_string),
            hours_per_day: self.config_hours_per_day,
        }
    }
}
