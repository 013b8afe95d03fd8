//! Weighted daily study-hour allocator
//!
//! Each subject gets a weight from its priority position and difficulty,
//! halved when it was already completed, and receives that share of the
//! daily hour budget:
//! 1. `priority = N - position` (first of N subjects weighs N, last weighs 1)
//! 2. `weight = priority * difficulty factor`, times the completed factor if mastered
//! 3. `hours = round(weight / total * hours_per_day, 1 decimal)`
//! 4. Every subject keeps at least the minimum block, even when that pushes
//!    the day's total above the budget.

use crate::core::error::PlanError;
use crate::core::models::{DailySlotAllocation, Difficulty, RankedSubject};

/// Default weight factor for hard subjects
pub const DEFAULT_HARD_FACTOR: f64 = 1.7;

/// Default weight factor for medium subjects
pub const DEFAULT_MEDIUM_FACTOR: f64 = 1.3;

/// Default weight factor for easy subjects
pub const DEFAULT_EASY_FACTOR: f64 = 1.0;

/// Default multiplier applied to completed subjects
pub const DEFAULT_COMPLETED_FACTOR: f64 = 0.5;

/// Default smallest study block handed to any subject, in hours
pub const DEFAULT_MIN_BLOCK_HOURS: f64 = 0.3;

/// Weighting knobs for the allocator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocatorConfig {
    /// Factor for hard subjects
    pub hard_factor: f64,
    /// Factor for medium subjects
    pub medium_factor: f64,
    /// Factor for easy subjects
    pub easy_factor: f64,
    /// Multiplier for completed subjects
    pub completed_factor: f64,
    /// Smallest block any subject receives
    pub min_block_hours: f64,
}

impl AllocatorConfig {
    /// Factor for a difficulty level
    #[must_use]
    pub const fn difficulty_factor(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Hard => self.hard_factor,
            Difficulty::Medium => self.medium_factor,
            Difficulty::Easy => self.easy_factor,
        }
    }

    /// Check that every factor is a finite, non-negative number and the
    /// minimum block is positive
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidFactor`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), PlanError> {
        let factors = [
            ("hard_factor", self.hard_factor),
            ("medium_factor", self.medium_factor),
            ("easy_factor", self.easy_factor),
            ("completed_factor", self.completed_factor),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::InvalidFactor { name, value });
            }
        }

        if !self.min_block_hours.is_finite() || self.min_block_hours <= 0.0 {
            return Err(PlanError::InvalidFactor {
                name: "min_block_hours",
                value: self.min_block_hours,
            });
        }

        Ok(())
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            hard_factor: DEFAULT_HARD_FACTOR,
            medium_factor: DEFAULT_MEDIUM_FACTOR,
            easy_factor: DEFAULT_EASY_FACTOR,
            completed_factor: DEFAULT_COMPLETED_FACTOR,
            min_block_hours: DEFAULT_MIN_BLOCK_HOURS,
        }
    }
}

/// Final weight of one subject before it is turned into hours
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectWeight {
    /// Subject name
    pub subject: String,
    /// Weight after difficulty and completion adjustments
    pub weight: f64,
}

/// Splits a daily hour budget across prioritised subjects
#[derive(Debug, Clone)]
pub struct StudyPlanAllocator {
    config: AllocatorConfig,
}

impl StudyPlanAllocator {
    /// Create an allocator with validated settings
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(config: AllocatorConfig) -> Result<Self, PlanError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Settings in use
    #[must_use]
    pub const fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Compute each subject's weight.
    ///
    /// The slice order is the priority order: position 0 is the highest priority.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute_weights(&self, subjects: &[RankedSubject]) -> Vec<SubjectWeight> {
        let n = subjects.len();
        subjects
            .iter()
            .enumerate()
            .map(|(idx, subject)| {
                let priority_weight = (n - idx) as f64;
                let base = priority_weight * self.config.difficulty_factor(subject.difficulty);
                let weight = if subject.is_completed {
                    base * self.config.completed_factor
                } else {
                    base
                };
                SubjectWeight {
                    subject: subject.name.clone(),
                    weight,
                }
            })
            .collect()
    }

    /// Allocate one day's hours across `subjects`, in input order.
    ///
    /// # Errors
    /// - [`PlanError::NoSubjects`] if `subjects` is empty
    /// - [`PlanError::InvalidHours`] if `hours_per_day` is not a positive number
    /// - [`PlanError::ZeroTotalWeight`] if the weights sum to zero
    pub fn allocate(
        &self,
        subjects: &[RankedSubject],
        hours_per_day: f64,
    ) -> Result<Vec<DailySlotAllocation>, PlanError> {
        if subjects.is_empty() {
            return Err(PlanError::NoSubjects);
        }
        if !hours_per_day.is_finite() || hours_per_day <= 0.0 {
            return Err(PlanError::InvalidHours(hours_per_day));
        }

        let weights = self.compute_weights(subjects);
        let total: f64 = weights.iter().map(|w| w.weight).sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(PlanError::ZeroTotalWeight);
        }

        Ok(weights
            .into_iter()
            .map(|w| {
                let hours = round_to_tenth(w.weight / total * hours_per_day);
                DailySlotAllocation {
                    subject: w.subject,
                    hours: hours.max(self.config.min_block_hours),
                }
            })
            .collect())
    }
}

impl Default for StudyPlanAllocator {
    fn default() -> Self {
        Self {
            config: AllocatorConfig::default(),
        }
    }
}

/// Round to one decimal place, halves away from zero
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(name: &str, rank: usize, difficulty: Difficulty, completed: bool) -> RankedSubject {
        RankedSubject::new(name, rank, difficulty, completed)
    }

    #[test]
    fn test_two_subject_split() {
        let allocator = StudyPlanAllocator::default();
        let subjects = vec![
            subject("DSA", 0, Difficulty::Hard, false),
            subject("OS", 1, Difficulty::Medium, false),
        ];

        let weights = allocator.compute_weights(&subjects);
        assert!((weights[0].weight - 3.4).abs() < 1e-9);
        assert!((weights[1].weight - 1.3).abs() < 1e-9);

        let slots = allocator.allocate(&subjects, 6.0).unwrap();
        assert_eq!(slots[0].subject, "DSA");
        assert!((slots[0].hours - 4.3).abs() < 1e-9);
        assert_eq!(slots[1].subject, "OS");
        assert!((slots[1].hours - 1.7).abs() < 1e-9);
    }

    #[test]
    fn test_completed_subject_is_halved() {
        let allocator = StudyPlanAllocator::default();
        let subjects = vec![
            subject("DSA", 0, Difficulty::Medium, true),
            subject("OS", 1, Difficulty::Medium, false),
        ];
        let weights = allocator.compute_weights(&subjects);
        assert!((weights[0].weight - 1.3).abs() < 1e-9);
        assert!((weights[1].weight - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_minimum_block() {
        let allocator = StudyPlanAllocator::default();
        let subjects: Vec<_> = (0..20)
            .map(|i| subject(&format!("S{i}"), i, Difficulty::Medium, false))
            .collect();

        let slots = allocator.allocate(&subjects, 1.0).unwrap();
        assert_eq!(slots.len(), 20);
        assert!(slots.iter().all(|s| s.hours >= 0.3));
        let total: f64 = slots.iter().map(|s| s.hours).sum();
        assert!(total > 3.0, "total was {total}");
    }

    #[test]
    fn test_rejects_bad_input() {
        let allocator = StudyPlanAllocator::default();
        let subjects = vec![subject("DSA", 0, Difficulty::Hard, false)];

        assert_eq!(allocator.allocate(&[], 4.0), Err(PlanError::NoSubjects));
        assert_eq!(
            allocator.allocate(&subjects, 0.0),
            Err(PlanError::InvalidHours(0.0))
        );
        assert_eq!(
            allocator.allocate(&subjects, -2.0),
            Err(PlanError::InvalidHours(-2.0))
        );
        assert!(matches!(
            allocator.allocate(&subjects, f64::NAN),
            Err(PlanError::InvalidHours(_))
        ));
    }

    #[test]
    fn test_rejects_zero_total_weight() {
        let config = AllocatorConfig {
            medium_factor: 0.0,
            ..AllocatorConfig::default()
        };
        let allocator = StudyPlanAllocator::new(config).unwrap();
        let subjects = vec![
            subject("DSA", 0, Difficulty::Medium, false),
            subject("OS", 1, Difficulty::Medium, false),
        ];
        assert_eq!(
            allocator.allocate(&subjects, 4.0),
            Err(PlanError::ZeroTotalWeight)
        );
    }

    #[test]
    fn test_config_validation() {
        let bad = AllocatorConfig {
            hard_factor: -1.0,
            ..AllocatorConfig::default()
        };
        assert_eq!(
            StudyPlanAllocator::new(bad).unwrap_err(),
            PlanError::InvalidFactor {
                name: "hard_factor",
                value: -1.0
            }
        );

        let bad = AllocatorConfig {
            min_block_hours: 0.0,
            ..AllocatorConfig::default()
        };
        assert!(StudyPlanAllocator::new(bad).is_err());
    }

    #[test]
    fn test_round_to_tenth() {
        assert!((round_to_tenth(4.340_425) - 4.3).abs() < 1e-9);
        assert!((round_to_tenth(1.659_574) - 1.7).abs() < 1e-9);
        assert!((round_to_tenth(0.049) - 0.0).abs() < 1e-9);
    }
}
