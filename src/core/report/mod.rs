//! Report generation for timetables and study plans
//!
//! Reports render to Markdown, HTML (both through askama templates) or JSON.

pub mod formats;

use crate::core::error::ReportError;
use crate::core::models::{ClassPeriod, DayOfWeek, PlanDay, PlanPhase, StudyPlan, TimeSlot};
use std::fs;
use std::path::Path;

pub use formats::{HtmlReporter, JsonReporter, MarkdownReporter, ReportFormat};

/// Data a report is rendered from
#[derive(Debug, Clone, Copy)]
pub enum ReportContext<'a> {
    /// A parsed timetable and the slot table it was laid out on
    Timetable {
        /// Parsed periods
        periods: &'a [ClassPeriod],
        /// Slot table in use
        slots: &'a [TimeSlot],
    },
    /// A generated study plan
    Plan(&'a StudyPlan),
}

impl ReportContext<'_> {
    /// Report heading
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Timetable { .. } => "Weekly Timetable",
            Self::Plan(_) => "Study Plan",
        }
    }
}

/// One day's classes, in slot order
#[derive(Debug, Clone)]
pub struct DaySchedule<'a> {
    /// Day the classes are on
    pub day: DayOfWeek,
    /// Classes on that day
    pub periods: Vec<&'a ClassPeriod>,
}

impl DaySchedule<'_> {
    /// Day name, e.g. "Monday"
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.day.label()
    }
}

/// Group periods by timetable day, Monday to Saturday, sorted by start time.
/// Days without classes are kept so every report shows the whole week.
#[must_use]
pub fn group_by_day(periods: &[ClassPeriod]) -> Vec<DaySchedule<'_>> {
    DayOfWeek::TIMETABLE_DAYS
        .iter()
        .map(|&day| {
            let mut day_periods: Vec<_> = periods.iter().filter(|p| p.day_index == day).collect();
            day_periods.sort_by(|a, b| a.start_time.cmp(&b.start_time));
            DaySchedule {
                day,
                periods: day_periods,
            }
        })
        .collect()
}

/// Display data for one plan phase
#[derive(Debug, Clone)]
pub struct PhaseSummary<'a> {
    /// Phase label, e.g. "Week 1"
    pub label: &'static str,
    /// First day number
    pub first_day: u32,
    /// Last day number
    pub last_day: u32,
    /// Subjects in priority order with their difficulty, e.g. "DSA (hard)"
    pub subjects: Vec<String>,
    /// The phase's days
    pub days: &'a [PlanDay],
}

impl<'a> PhaseSummary<'a> {
    /// Summarise a phase
    #[must_use]
    pub fn new(phase: &'a PlanPhase) -> Self {
        let subjects = phase
            .ranked_subjects
            .iter()
            .map(|name| match phase.difficulty_levels.get(name) {
                Some(level) => format!("{name} ({level})"),
                None => name.clone(),
            })
            .collect();

        Self {
            label: phase.phase.label(),
            first_day: phase.first_day().unwrap_or_default(),
            last_day: phase.last_day().unwrap_or_default(),
            subjects,
            days: &phase.days,
        }
    }
}

/// Summaries of every phase of `plan`
#[must_use]
pub fn phase_summaries(plan: &StudyPlan) -> Vec<PhaseSummary<'_>> {
    plan.phases.iter().map(PhaseSummary::new).collect()
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError>;

    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing the file fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ReportError> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}
