//! Command handlers for the CLI

pub mod config;
pub mod plan;
pub mod remind;
pub mod suggest;
pub mod timetable;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use study_planner::config::Config;
use study_planner::core::error::{
    ConfigError, PlanError, ReportError, ScheduleError, SubscriptionError,
};
use study_planner::core::report::{ReportContext, ReportFormat};
use thiserror::Error;

/// Errors surfaced by command handlers
#[derive(Debug, Error)]
pub enum CommandError {
    /// A file could not be read or written
    #[error("{action} {}: {source}", .path.display())]
    Io {
        /// What was being done
        action: &'static str,
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A JSON file did not parse or could not be written
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// A command-line argument is unusable
    #[error("{0}")]
    InvalidArgument(String),

    /// Timetable tables could not be built
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Planner input was rejected
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Report generation failed
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Configuration could not be changed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Subscription was rejected
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
}

/// Read a text file
pub fn read_text(path: &Path) -> Result<String, CommandError> {
    fs::read_to_string(path).map_err(|source| CommandError::Io {
        action: "failed to read",
        path: path.to_path_buf(),
        source,
    })
}

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|source| CommandError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a JSON file, or return the default value if it does not exist
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, CommandError> {
    if path.exists() {
        read_json(path)
    } else {
        debug!("{} does not exist yet, starting empty", path.display());
        Ok(T::default())
    }
}

/// Serialize a value as pretty JSON, creating parent directories
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CommandError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| CommandError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    ensure_parent(path)?;
    fs::write(path, json).map_err(|source| CommandError::Io {
        action: "failed to write",
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent(path: &Path) -> Result<(), CommandError> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => fs::create_dir_all(parent).map_err(|source| CommandError::Io {
            action: "failed to create directory",
            path: parent.to_path_buf(),
            source,
        }),
        None => Ok(()),
    }
}

/// Output path: the explicit one, or `<dir>/<stem>.<extension>`
pub fn output_path(explicit: Option<&Path>, dir: &str, stem: &str, extension: &str) -> PathBuf {
    explicit.map_or_else(
        || PathBuf::from(dir).join(format!("{stem}.{extension}")),
        Path::to_path_buf,
    )
}

/// Render a report into the configured reports directory
pub fn write_report(
    ctx: &ReportContext,
    format_str: &str,
    stem: &str,
    config: &Config,
) -> Result<PathBuf, CommandError> {
    let format: ReportFormat = format_str.parse().map_err(CommandError::InvalidArgument)?;
    let path = output_path(None, &config.paths.reports_dir, stem, format.extension());
    ensure_parent(&path)?;
    format.reporter().generate(ctx, &path)?;
    Ok(path)
}
