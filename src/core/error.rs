//! Error types for `StudyPlanner`
//!
//! Parsing OCR text never fails; everything here is raised either while
//! building the configurable tables, while validating planner input, or by
//! the outer layers (configuration files and report output).

use thiserror::Error;

/// Errors raised while building a slot table or subject vocabulary
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The slot table has no slots
    #[error("a timetable needs at least one time slot")]
    NoSlots,

    /// A slot boundary is not a valid `HH:MM` time
    #[error("invalid slot time '{0}', expected HH:MM")]
    InvalidTime(String),

    /// A slot ends before (or when) it starts
    #[error("slot {start}-{end} ends before it starts")]
    InvertedSlot {
        /// Slot start as written
        start: String,
        /// Slot end as written
        end: String,
    },

    /// A slot starts before the previous slot has ended
    #[error("slot {next} starts before slot {previous} ends")]
    OverlappingSlots {
        /// Earlier slot, `start-end`
        previous: String,
        /// Offending slot, `start-end`
        next: String,
    },

    /// A vocabulary entry is blank
    #[error("subject names in the vocabulary must not be blank")]
    BlankSubject,

    /// A vocabulary entry could not be compiled to a pattern
    #[error("failed to compile subject pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors raised by the study plan allocator and phase planner
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// No subjects were supplied
    #[error("at least one subject is required to build a study plan")]
    NoSubjects,

    /// Daily hour budget is zero, negative or not a number
    #[error("hours per day must be a positive number, got {0}")]
    InvalidHours(f64),

    /// Day count is zero
    #[error("the number of days must be positive")]
    InvalidDayCount,

    /// All subject weights cancel out
    #[error("all subject weights are zero; adjust priorities or difficulty factors")]
    ZeroTotalWeight,

    /// An allocator factor is negative or not a number
    #[error("invalid planner setting '{name}': {value}")]
    InvalidFactor {
        /// Name of the setting
        name: &'static str,
        /// Rejected value
        value: f64,
    },
}

/// Errors raised while reading, editing or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key is not a known configuration key
    #[error("Unknown config key: '{0}'")]
    UnknownKey(String),

    /// Value could not be parsed for the given key
    #[error("Invalid value for '{key}': '{value}' (expected {expected})")]
    InvalidValue {
        /// Key being set
        key: String,
        /// Rejected value
        value: String,
        /// Description of the accepted format
        expected: &'static str,
    },

    /// Config file could not be read or written
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    /// Config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised while rendering or writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// Template rendering failed
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),

    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Report file could not be written
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while registering a push subscription
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// Subscription has no endpoint
    #[error("invalid subscription: endpoint must not be blank")]
    BlankEndpoint,
}
