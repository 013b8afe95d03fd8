//! Data models for `StudyPlanner`

pub mod day;
pub mod period;
pub mod plan;
pub mod subject;

pub use day::DayOfWeek;
pub use period::{parse_clock_time, ClassPeriod, TimeSlot};
pub use plan::{DailySlotAllocation, PhaseKind, PlanDay, PlanPhase, StudyPlan};
pub use subject::{Difficulty, RankedSubject};
