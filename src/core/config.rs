//! Configuration module for `StudyPlanner`

use crate::core::error::{ConfigError, PlanError, ScheduleError};
use crate::core::models::TimeSlot;
use crate::core::planner::allocator::{
    DEFAULT_COMPLETED_FACTOR, DEFAULT_EASY_FACTOR, DEFAULT_HARD_FACTOR, DEFAULT_MEDIUM_FACTOR,
    DEFAULT_MIN_BLOCK_HOURS,
};
use crate::core::planner::{
    AllocatorConfig, PhasePlanner, StudyPlanAllocator, DEFAULT_FIRST_PHASE_DAYS,
};
use crate::core::reminders::DEFAULT_LEAD_MINUTES;
use crate::core::timetable::{
    standard_slots, SlotTable, SubjectVocabulary, TimetableParser, STANDARD_SUBJECTS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$STUDY_PLANNER";

/// Default daily study budget in hours
pub const DEFAULT_HOURS_PER_DAY: f64 = 4.0;

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path; empty logs to stderr
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for parsed timetable JSON
    #[serde(default)]
    pub timetables_dir: String,
    /// Directory for study plan JSON
    #[serde(default)]
    pub plans_dir: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

const fn default_hours_per_day() -> f64 {
    DEFAULT_HOURS_PER_DAY
}
const fn default_first_phase_days() -> u32 {
    DEFAULT_FIRST_PHASE_DAYS
}
const fn default_lead_minutes() -> u32 {
    DEFAULT_LEAD_MINUTES
}
const fn default_hard_factor() -> f64 {
    DEFAULT_HARD_FACTOR
}
const fn default_medium_factor() -> f64 {
    DEFAULT_MEDIUM_FACTOR
}
const fn default_easy_factor() -> f64 {
    DEFAULT_EASY_FACTOR
}
const fn default_completed_factor() -> f64 {
    DEFAULT_COMPLETED_FACTOR
}
const fn default_min_block_hours() -> f64 {
    DEFAULT_MIN_BLOCK_HOURS
}

/// Study planner and reminder settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Daily study budget used when none is given on the command line
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
    /// Length of the first planning phase in days
    #[serde(default = "default_first_phase_days")]
    pub first_phase_days: u32,
    /// Minutes before a class that its reminder becomes due
    #[serde(default = "default_lead_minutes")]
    pub reminder_lead_minutes: u32,
    /// Weight factor for hard subjects
    #[serde(default = "default_hard_factor")]
    pub hard_factor: f64,
    /// Weight factor for medium subjects
    #[serde(default = "default_medium_factor")]
    pub medium_factor: f64,
    /// Weight factor for easy subjects
    #[serde(default = "default_easy_factor")]
    pub easy_factor: f64,
    /// Multiplier for completed subjects
    #[serde(default = "default_completed_factor")]
    pub completed_factor: f64,
    /// Smallest block any subject receives, in hours
    #[serde(default = "default_min_block_hours")]
    pub min_block_hours: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            first_phase_days: DEFAULT_FIRST_PHASE_DAYS,
            reminder_lead_minutes: DEFAULT_LEAD_MINUTES,
            hard_factor: DEFAULT_HARD_FACTOR,
            medium_factor: DEFAULT_MEDIUM_FACTOR,
            easy_factor: DEFAULT_EASY_FACTOR,
            completed_factor: DEFAULT_COMPLETED_FACTOR,
            min_block_hours: DEFAULT_MIN_BLOCK_HOURS,
        }
    }
}

/// Subject vocabulary and slot table used by the timetable parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableConfig {
    /// Recognised subject names, matched case-insensitively
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Teaching periods of the day, in order
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            subjects: STANDARD_SUBJECTS.iter().map(ToString::to_string).collect(),
            slots: standard_slots(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Planner settings
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Timetable parser settings
    #[serde(default)]
    pub timetable: TimetableConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override timetable output directory
    pub timetables_dir: Option<String>,
    /// Override plan output directory
    pub plans_dir: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override the daily study budget
    pub hours_per_day: Option<f64>,
}

fn fill_if_empty(target: &mut String, default: &str) -> bool {
    if target.is_empty() && !default.is_empty() {
        default.clone_into(target);
        true
    } else {
        false
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "a non-negative number",
        })
}

fn parse_positive_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    let number = parse_number(key, value)?;
    if number > 0.0 {
        Ok(number)
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "a positive number",
        })
    }
}

fn parse_positive_count(key: &str, value: &str) -> Result<u32, ConfigError> {
    let count = parse_count(key, value)?;
    if count > 0 {
        Ok(count)
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "a whole number of at least 1",
        })
    }
}

fn parse_count(key: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "a whole number",
        })
}

fn parse_slots(value: &str) -> Result<Vec<TimeSlot>, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: "slots".to_string(),
        value: value.to_string(),
        expected: "comma-separated HH:MM-HH:MM ranges",
    };

    let slots = value
        .split(',')
        .map(|range| {
            range
                .split_once('-')
                .map(|(start, end)| TimeSlot::new(start.trim(), end.trim()))
                .ok_or_else(invalid)
        })
        .collect::<Result<Vec<_>, _>>()?;

    SlotTable::new(slots.clone()).map_err(|_| invalid())?;
    Ok(slots)
}

impl Config {
    /// Get the `$STUDY_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/studyplanner`
    /// - macOS: `~/Library/Application Support/studyplanner`
    /// - Windows: `%APPDATA%\studyplanner`
    #[must_use]
    pub fn get_studyplanner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studyplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields and lists that are empty here and non-empty in
    /// `defaults` are filled; numeric fields get their defaults from serde.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        changed |= fill_if_empty(&mut self.logging.level, &defaults.logging.level);
        changed |= fill_if_empty(&mut self.logging.file, &defaults.logging.file);

        changed |= fill_if_empty(&mut self.paths.timetables_dir, &defaults.paths.timetables_dir);
        changed |= fill_if_empty(&mut self.paths.plans_dir, &defaults.paths.plans_dir);
        changed |= fill_if_empty(&mut self.paths.reports_dir, &defaults.paths.reports_dir);

        if self.timetable.subjects.is_empty() && !defaults.timetable.subjects.is_empty() {
            self.timetable
                .subjects
                .clone_from(&defaults.timetable.subjects);
            changed = true;
        }
        if self.timetable.slots.is_empty() && !defaults.timetable.slots.is_empty() {
            self.timetable.slots.clone_from(&defaults.timetable.slots);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(dir) = &overrides.timetables_dir {
            self.paths.timetables_dir.clone_from(dir);
        }
        if let Some(dir) = &overrides.plans_dir {
            self.paths.plans_dir.clone_from(dir);
        }
        if let Some(dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(dir);
        }

        if let Some(hours) = overrides.hours_per_day {
            self.planner.hours_per_day = hours;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_studyplanner_dir`](Self::get_studyplanner_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_studyplanner_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$STUDY_PLANNER` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_studyplanner_dir();
            value.replace(DIR_VARIABLE, &dir.to_string_lossy())
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults and `$STUDY_PLANNER` is
    /// expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.timetables_dir = Self::expand_variables(&config.paths.timetables_dir);
        config.paths.plans_dir = Self::expand_variables(&config.paths.plans_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from the compiled-in defaults
    ///
    /// - Debug: `DefaultCLIConfigDebug.toml`
    /// - Release: `DefaultCLIConfigRelease.toml`
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_default()
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the file exists it is loaded, missing fields are filled from the
    ///   defaults and the file is rewritten when anything was added.
    /// - On first run the directory and file are created from the defaults.
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file)
            .map_err(ConfigError::from)
            .and_then(|content| Self::from_toml(&content))
        {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            Err(_) => defaults,
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the config
    /// directory cannot be created or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Keys are the field names of every section (`level`, `plans_dir`,
    /// `hard_factor`, `subjects`, ...); dashes are accepted in place of
    /// underscores. Lists are returned comma-separated.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "timetables_dir" => self.paths.timetables_dir.clone(),
            "plans_dir" => self.paths.plans_dir.clone(),
            "reports_dir" => self.paths.reports_dir.clone(),
            "hours_per_day" => self.planner.hours_per_day.to_string(),
            "first_phase_days" => self.planner.first_phase_days.to_string(),
            "reminder_lead_minutes" => self.planner.reminder_lead_minutes.to_string(),
            "hard_factor" => self.planner.hard_factor.to_string(),
            "medium_factor" => self.planner.medium_factor.to_string(),
            "easy_factor" => self.planner.easy_factor.to_string(),
            "completed_factor" => self.planner.completed_factor.to_string(),
            "min_block_hours" => self.planner.min_block_hours.to_string(),
            "subjects" => self.timetable.subjects.join(","),
            "slots" => self
                .timetable
                .slots
                .iter()
                .map(|s| format!("{}-{}", s.start, s.end))
                .collect::<Vec<_>>()
                .join(","),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// Numbers, booleans, log levels and slot ranges are validated before they
    /// are stored. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownKey`] for unknown keys and
    /// [`ConfigError::InvalidValue`] for values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let normalized = key.replace('-', "_");
        match normalized.as_str() {
            "level" => {
                let level = value.trim().to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(ConfigError::InvalidValue {
                        key: normalized.clone(),
                        value: value.to_string(),
                        expected: "one of off, error, warn, info, debug, trace",
                    });
                }
                self.logging.level = level;
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose =
                    value
                        .trim()
                        .parse::<bool>()
                        .map_err(|_| ConfigError::InvalidValue {
                            key: normalized.clone(),
                            value: value.to_string(),
                            expected: "true or false",
                        })?;
            }
            "timetables_dir" => self.paths.timetables_dir = value.to_string(),
            "plans_dir" => self.paths.plans_dir = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "hours_per_day" => {
                self.planner.hours_per_day = parse_positive_number(&normalized, value)?;
            }
            "first_phase_days" => {
                self.planner.first_phase_days = parse_positive_count(&normalized, value)?;
            }
            "reminder_lead_minutes" => {
                self.planner.reminder_lead_minutes = parse_count(&normalized, value)?;
            }
            "hard_factor" => self.planner.hard_factor = parse_number(&normalized, value)?,
            "medium_factor" => self.planner.medium_factor = parse_number(&normalized, value)?,
            "easy_factor" => self.planner.easy_factor = parse_number(&normalized, value)?,
            "completed_factor" => {
                self.planner.completed_factor = parse_number(&normalized, value)?;
            }
            "min_block_hours" => {
                self.planner.min_block_hours = parse_positive_number(&normalized, value)?;
            }
            "subjects" => {
                self.timetable.subjects = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect();
            }
            "slots" => self.timetable.slots = parse_slots(value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its value in `defaults`)
    ///
    /// Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownKey`] if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), ConfigError> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "timetables_dir" => self
                .paths
                .timetables_dir
                .clone_from(&defaults.paths.timetables_dir),
            "plans_dir" => self.paths.plans_dir.clone_from(&defaults.paths.plans_dir),
            "reports_dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "hours_per_day" => self.planner.hours_per_day = defaults.planner.hours_per_day,
            "first_phase_days" => {
                self.planner.first_phase_days = defaults.planner.first_phase_days;
            }
            "reminder_lead_minutes" => {
                self.planner.reminder_lead_minutes = defaults.planner.reminder_lead_minutes;
            }
            "hard_factor" => self.planner.hard_factor = defaults.planner.hard_factor,
            "medium_factor" => self.planner.medium_factor = defaults.planner.medium_factor,
            "easy_factor" => self.planner.easy_factor = defaults.planner.easy_factor,
            "completed_factor" => {
                self.planner.completed_factor = defaults.planner.completed_factor;
            }
            "min_block_hours" => self.planner.min_block_hours = defaults.planner.min_block_hours,
            "subjects" => self
                .timetable
                .subjects
                .clone_from(&defaults.timetable.subjects),
            "slots" => self.timetable.slots.clone_from(&defaults.timetable.slots),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Allocator settings from the `[planner]` section
    #[must_use]
    pub const fn allocator_config(&self) -> AllocatorConfig {
        AllocatorConfig {
            hard_factor: self.planner.hard_factor,
            medium_factor: self.planner.medium_factor,
            easy_factor: self.planner.easy_factor,
            completed_factor: self.planner.completed_factor,
            min_block_hours: self.planner.min_block_hours,
        }
    }

    /// Phase planner built from the `[planner]` section
    ///
    /// # Errors
    /// Returns an error if a factor is invalid or the first phase length is zero.
    pub fn phase_planner(&self) -> Result<PhasePlanner, PlanError> {
        let allocator = StudyPlanAllocator::new(self.allocator_config())?;
        PhasePlanner::new(allocator, self.planner.first_phase_days)
    }

    /// Timetable parser built from the `[timetable]` section
    ///
    /// # Errors
    /// Returns an error if the subject list or slot table is invalid.
    pub fn timetable_parser(&self) -> Result<TimetableParser, ScheduleError> {
        let vocabulary = SubjectVocabulary::new(&self.timetable.subjects)?;
        let slots = SlotTable::new(self.timetable.slots.clone())?;
        Ok(TimetableParser::new(vocabulary, slots))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  timetables_dir = \"{}\"", self.paths.timetables_dir)?;
        writeln!(f, "  plans_dir = \"{}\"", self.paths.plans_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[planner]")?;
        writeln!(f, "  hours_per_day = {}", self.planner.hours_per_day)?;
        writeln!(f, "  first_phase_days = {}", self.planner.first_phase_days)?;
        writeln!(
            f,
            "  reminder_lead_minutes = {}",
            self.planner.reminder_lead_minutes
        )?;
        writeln!(f, "  hard_factor = {}", self.planner.hard_factor)?;
        writeln!(f, "  medium_factor = {}", self.planner.medium_factor)?;
        writeln!(f, "  easy_factor = {}", self.planner.easy_factor)?;
        writeln!(f, "  completed_factor = {}", self.planner.completed_factor)?;
        writeln!(f, "  min_block_hours = {}", self.planner.min_block_hours)?;

        writeln!(f, "\n[timetable]")?;
        writeln!(f, "  subjects = {}", self.timetable.subjects.join(", "))?;
        for slot in &self.timetable.slots {
            writeln!(f, "  slot {}-{}", slot.start, slot.end)?;
        }

        Ok(())
    }
}
