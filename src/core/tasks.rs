//! Task scheduling helpers
//!
//! Conflict detection between scheduled tasks, free time slot suggestions for
//! a day, and priority ordering.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Earliest hour considered when suggesting a slot
pub const FIRST_SUGGESTED_HOUR: u32 = 6;

/// Latest hour considered when suggesting a slot
pub const LAST_SUGGESTED_HOUR: u32 = 22;

/// Number of suggestions returned
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Do first
    #[serde(alias = "high")]
    High,
    /// Default priority
    #[default]
    #[serde(alias = "medium")]
    Medium,
    /// Do last
    #[serde(alias = "low")]
    Low,
}

impl TaskPriority {
    const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// A to-do item, optionally placed at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique id
    pub id: String,
    /// Display name
    pub name: String,
    /// Priority
    #[serde(default)]
    pub priority: TaskPriority,
    /// Length in hours
    #[serde(rename = "duration")]
    pub duration_hours: f64,
    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDateTime>,
    /// When the task is scheduled to start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<NaiveDateTime>,
    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Scheduled `[start, end)` interval, if the task is scheduled
    #[must_use]
    pub fn interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.scheduled_time
            .map(|start| (start, start + hours_to_duration(self.duration_hours)))
    }
}

/// A suggested start time with its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRecommendation {
    /// Suggested start
    pub start: NaiveDateTime,
    /// Higher is better, out of 100
    pub score: u8,
    /// Why the slot scores as it does
    pub reason: &'static str,
}

#[allow(clippy::cast_possible_truncation)]
fn hours_to_duration(hours: f64) -> Duration {
    let hours = if hours.is_finite() {
        hours.clamp(0.0, 24.0 * 366.0)
    } else {
        0.0
    };
    Duration::seconds((hours * 3600.0).round() as i64)
}

fn overlaps(a: (NaiveDateTime, NaiveDateTime), b: (NaiveDateTime, NaiveDateTime)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Incomplete scheduled tasks, other than `candidate`, whose intervals
/// overlap the candidate's. An unscheduled candidate conflicts with nothing.
#[must_use]
pub fn detect_conflicts<'a>(tasks: &'a [Task], candidate: &Task) -> Vec<&'a Task> {
    let Some(window) = candidate.interval() else {
        return Vec::new();
    };

    tasks
        .iter()
        .filter(|t| t.id != candidate.id && !t.completed)
        .filter(|t| t.interval().is_some_and(|other| overlaps(window, other)))
        .collect()
}

/// Score for starting focused work at `hour`
#[must_use]
pub const fn score_hour(hour: u32) -> (u8, &'static str) {
    match hour {
        7..=9 => (95, "Morning peak focus time"),
        19..=21 => (90, "Evening high productivity"),
        14..=16 => (70, "Post-lunch moderate energy"),
        10..=12 => (85, "Late morning clarity"),
        _ => (60, "Available time slot"),
    }
}

/// Suggest up to three free start times on `date` for a task of
/// `duration_hours`, best score first and earlier hours first on ties.
#[must_use]
pub fn recommend_time_slots(
    tasks: &[Task],
    duration_hours: f64,
    date: NaiveDate,
) -> Vec<SlotRecommendation> {
    let duration = hours_to_duration(duration_hours);
    let busy: Vec<_> = tasks
        .iter()
        .filter(|t| !t.completed)
        .filter_map(Task::interval)
        .collect();

    let mut slots: Vec<SlotRecommendation> = (FIRST_SUGGESTED_HOUR..=LAST_SUGGESTED_HOUR)
        .filter_map(|hour| {
            let start = date.and_time(NaiveTime::from_hms_opt(hour, 0, 0)?);
            let window = (start, start + duration);
            if busy.iter().any(|b| overlaps(window, *b)) {
                return None;
            }
            let (score, reason) = score_hour(hour);
            Some(SlotRecommendation {
                start,
                score,
                reason,
            })
        })
        .collect();

    slots.sort_by(|a, b| b.score.cmp(&a.score));
    slots.truncate(MAX_RECOMMENDATIONS);
    slots
}

/// Stable sort: high priority first, then medium, then low
pub fn sort_by_priority(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| t.priority.rank());
}
