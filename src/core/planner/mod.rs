//! Study plan generation
//!
//! [`StudyPlanAllocator`] splits a daily hour budget across prioritised
//! subjects; [`PhasePlanner`] repeats that allocation over the days of one or
//! two planning phases.

pub mod allocator;
pub mod phases;

pub use allocator::{round_to_tenth, AllocatorConfig, StudyPlanAllocator, SubjectWeight};
pub use phases::{PhasePlanner, PhaseSplit, DEFAULT_FIRST_PHASE_DAYS};
