//! Study plan models

use super::Difficulty;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hours given to one subject on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySlotAllocation {
    /// Subject name
    pub subject: String,
    /// Study hours, one decimal place, never below the minimum block
    pub hours: f64,
}

/// One numbered day of a study plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDay {
    /// 1-based day number across the whole plan
    pub day_number: u32,
    /// Allocation blocks for the day
    pub slots: Vec<DailySlotAllocation>,
}

impl PlanDay {
    /// Total hours scheduled on this day
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.slots.iter().map(|slot| slot.hours).sum()
    }
}

/// Which planning phase a set of days belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    /// The opening phase (at most the configured first-phase length)
    #[serde(rename = "week1")]
    FirstWeek,
    /// The remaining days, planned with fresh priorities
    #[serde(rename = "week2")]
    FollowUp,
}

impl PhaseKind {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstWeek => "Week 1",
            Self::FollowUp => "Week 2",
        }
    }
}

/// A planning phase: one allocation repeated over a run of days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPhase {
    /// Phase marker
    pub phase: PhaseKind,
    /// Subjects in priority order
    pub ranked_subjects: Vec<String>,
    /// Difficulty chosen for each subject in this phase
    pub difficulty_levels: BTreeMap<String, Difficulty>,
    /// Planned days
    pub days: Vec<PlanDay>,
}

impl PlanPhase {
    /// Number of the first day in this phase, if it has any days
    #[must_use]
    pub fn first_day(&self) -> Option<u32> {
        self.days.first().map(|day| day.day_number)
    }

    /// Number of the last day in this phase, if it has any days
    #[must_use]
    pub fn last_day(&self) -> Option<u32> {
        self.days.last().map(|day| day.day_number)
    }
}

/// A complete multi-phase study plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    /// Daily hour budget the plan was built with
    pub hours_per_day: f64,
    /// Total number of days requested
    pub total_days: u32,
    /// Phases in day order
    pub phases: Vec<PlanPhase>,
}

impl StudyPlan {
    /// Number of days actually planned across all phases
    #[must_use]
    pub fn planned_days(&self) -> usize {
        self.phases.iter().map(|phase| phase.days.len()).sum()
    }
}
