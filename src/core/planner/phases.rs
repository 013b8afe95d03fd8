//! Multi-phase study plans
//!
//! A plan opens with a short first phase (six days by default). Any days left
//! after that form a follow-up phase which the student plans again with fresh
//! priorities. Each phase repeats one day's allocation over its days; phases
//! share nothing but the day numbering.

use super::StudyPlanAllocator;
use crate::core::error::PlanError;
use crate::core::models::{PhaseKind, PlanDay, PlanPhase, RankedSubject, StudyPlan};
use std::collections::BTreeMap;

/// Default length of the first phase in days
pub const DEFAULT_FIRST_PHASE_DAYS: u32 = 6;

/// How a plan's days divide between the two phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSplit {
    /// Days in the first phase
    pub first: u32,
    /// Days left for the follow-up phase
    pub remaining: u32,
}

/// Builds phased study plans on top of the allocator
#[derive(Debug, Clone)]
pub struct PhasePlanner {
    allocator: StudyPlanAllocator,
    first_phase_days: u32,
}

impl PhasePlanner {
    /// Create a phase planner
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidDayCount`] if `first_phase_days` is zero.
    pub fn new(allocator: StudyPlanAllocator, first_phase_days: u32) -> Result<Self, PlanError> {
        if first_phase_days == 0 {
            return Err(PlanError::InvalidDayCount);
        }
        Ok(Self {
            allocator,
            first_phase_days,
        })
    }

    /// Allocator used for each phase
    #[must_use]
    pub const fn allocator(&self) -> &StudyPlanAllocator {
        &self.allocator
    }

    /// Split `total_days` into first-phase and remaining days
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidDayCount`] if `total_days` is zero.
    pub fn split_days(&self, total_days: u32) -> Result<PhaseSplit, PlanError> {
        if total_days == 0 {
            return Err(PlanError::InvalidDayCount);
        }
        let first = total_days.min(self.first_phase_days);
        Ok(PhaseSplit {
            first,
            remaining: total_days - first,
        })
    }

    /// Build one phase: a single day's allocation repeated over `day_count`
    /// days numbered from `first_day_number`.
    ///
    /// # Errors
    /// Returns an error if `day_count` is zero or the allocator rejects the input.
    pub fn build_phase(
        &self,
        kind: PhaseKind,
        subjects: &[RankedSubject],
        hours_per_day: f64,
        day_count: u32,
        first_day_number: u32,
    ) -> Result<PlanPhase, PlanError> {
        if day_count == 0 {
            return Err(PlanError::InvalidDayCount);
        }

        let slots = self.allocator.allocate(subjects, hours_per_day)?;
        let days = (0..day_count)
            .map(|offset| PlanDay {
                day_number: first_day_number + offset,
                slots: slots.clone(),
            })
            .collect();

        Ok(PlanPhase {
            phase: kind,
            ranked_subjects: subjects.iter().map(|s| s.name.clone()).collect(),
            difficulty_levels: subjects
                .iter()
                .map(|s| (s.name.clone(), s.difficulty))
                .collect::<BTreeMap<_, _>>(),
            days,
        })
    }

    /// Build a full plan for `total_days`.
    ///
    /// The first phase uses `first_subjects`. When days remain, the follow-up
    /// phase uses `followup_subjects`, or the first phase's subjects again if
    /// none are given.
    ///
    /// # Errors
    /// Returns an error if the day count is zero or either phase's input is rejected.
    pub fn plan(
        &self,
        first_subjects: &[RankedSubject],
        followup_subjects: Option<&[RankedSubject]>,
        hours_per_day: f64,
        total_days: u32,
    ) -> Result<StudyPlan, PlanError> {
        let split = self.split_days(total_days)?;

        let mut phases = vec![self.build_phase(
            PhaseKind::FirstWeek,
            first_subjects,
            hours_per_day,
            split.first,
            1,
        )?];

        if split.remaining > 0 {
            phases.push(self.build_phase(
                PhaseKind::FollowUp,
                followup_subjects.unwrap_or(first_subjects),
                hours_per_day,
                split.remaining,
                split.first + 1,
            )?);
        }

        Ok(StudyPlan {
            hours_per_day,
            total_days,
            phases,
        })
    }
}

impl Default for PhasePlanner {
    fn default() -> Self {
        Self {
            allocator: StudyPlanAllocator::default(),
            first_phase_days: DEFAULT_FIRST_PHASE_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Difficulty;

    fn subjects(names: &[&str]) -> Vec<RankedSubject> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| RankedSubject::new(*n, i, Difficulty::Medium, false))
            .collect()
    }

    #[test]
    fn test_split_days() {
        let planner = PhasePlanner::default();
        assert_eq!(
            planner.split_days(4).unwrap(),
            PhaseSplit {
                first: 4,
                remaining: 0
            }
        );
        assert_eq!(
            planner.split_days(6).unwrap(),
            PhaseSplit {
                first: 6,
                remaining: 0
            }
        );
        assert_eq!(
            planner.split_days(10).unwrap(),
            PhaseSplit {
                first: 6,
                remaining: 4
            }
        );
        assert_eq!(planner.split_days(0), Err(PlanError::InvalidDayCount));
    }

    #[test]
    fn test_zero_length_first_phase_rejected() {
        assert!(PhasePlanner::new(StudyPlanAllocator::default(), 0).is_err());
    }

    #[test]
    fn test_phase_repeats_one_day() {
        let planner = PhasePlanner::default();
        let phase = planner
            .build_phase(PhaseKind::FirstWeek, &subjects(&["DSA", "OS"]), 3.0, 3, 1)
            .unwrap();

        assert_eq!(phase.days.len(), 3);
        assert_eq!(phase.first_day(), Some(1));
        assert_eq!(phase.last_day(), Some(3));
        assert!(phase.days.iter().all(|d| d.slots == phase.days[0].slots));
        assert_eq!(phase.ranked_subjects, vec!["DSA", "OS"]);
        assert_eq!(phase.difficulty_levels["OS"], Difficulty::Medium);
    }

    #[test]
    fn test_plan_with_followup_numbers_days_after_first_phase() {
        let planner = PhasePlanner::default();
        let first = subjects(&["DSA", "OS"]);
        let followup = subjects(&["JAVA"]);

        let plan = planner.plan(&first, Some(followup.as_slice()), 2.0, 9).unwrap();

        assert_eq!(plan.phases.len(), 2);
        assert_eq!(plan.planned_days(), 9);
        assert_eq!(plan.phases[1].phase, PhaseKind::FollowUp);
        assert_eq!(plan.phases[1].first_day(), Some(7));
        assert_eq!(plan.phases[1].last_day(), Some(9));
        assert_eq!(plan.phases[1].days[0].slots[0].subject, "JAVA");
        assert!((plan.phases[1].days[0].slots[0].hours - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_plan_reuses_first_subjects_without_followup() {
        let planner = PhasePlanner::default();
        let first = subjects(&["DSA"]);
        let plan = planner.plan(&first, None, 2.0, 8).unwrap();
        assert_eq!(plan.phases[1].ranked_subjects, vec!["DSA"]);
    }

    #[test]
    fn test_short_plan_has_single_phase() {
        let planner = PhasePlanner::default();
        let plan = planner.plan(&subjects(&["DSA"]), None, 2.0, 5).unwrap();
        assert_eq!(plan.phases.len(), 1);
        assert_eq!(plan.phases[0].phase, PhaseKind::FirstWeek);
    }
}
