//! Logging setup on top of `log` + `fern`
//!
//! Console records go to stderr as `[LEVEL] message`. When a log file is
//! configured, records go there instead, timestamped. Verbose output is a
//! separate plain printer and never reaches the log file.

use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::Dispatch;
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Runtime flag controlling whether `verbose!` output should emit.
static VERBOSE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Errors raised while installing the logger
#[derive(Debug, Error)]
pub enum LoggerError {
    /// Log file or its directory could not be created
    #[error("failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    /// A global logger was already installed
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// How the logger should be set up
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Most verbose level to emit
    pub level: LevelFilter,
    /// Write records to this file instead of stderr
    pub file: Option<PathBuf>,
    /// Enable `verbose!` output
    pub verbose: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            file: None,
            verbose: false,
        }
    }
}

/// Parse a level name (case-insensitive)
#[must_use]
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" | "err" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Enable or disable `verbose!` output
pub fn set_verbose(enabled: bool) {
    VERBOSE_ENABLED.store(enabled, Ordering::SeqCst);
}

/// Whether `verbose!` output is enabled
#[must_use]
pub fn is_verbose() -> bool {
    VERBOSE_ENABLED.load(Ordering::SeqCst)
}

/// Install the global logger. Call once, at the start of `main`.
///
/// # Errors
/// Returns an error if the log file cannot be opened or a logger is already set.
pub fn init(options: &LogOptions) -> Result<(), LoggerError> {
    set_verbose(options.verbose);

    let base = Dispatch::new().level(options.level);

    let dispatch = match &options.file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            base.format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.target(),
                    message
                ));
            })
            .chain(fern::log_file(path)?)
        }
        None => {
            let colors = ColoredLevelConfig::new()
                .error(Color::Red)
                .warn(Color::Yellow)
                .info(Color::Green)
                .debug(Color::Blue)
                .trace(Color::BrightBlack);
            base.format(move |out, message, record| {
                out.finish(format_args!("[{}] {}", colors.color(record.level()), message));
            })
            .chain(std::io::stderr())
        }
    };

    dispatch.apply()?;
    Ok(())
}

/// Print a line to stdout when verbose output is enabled
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::shared::logger::is_verbose() {
            println!($($arg)*);
        }
    };
}
