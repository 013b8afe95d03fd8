//! Subject models used as planner input

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// How hard a subject is for the student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy subject
    Easy,
    /// Medium subject (default when unspecified)
    #[default]
    Medium,
    /// Hard subject
    Hard,
}

impl Difficulty {
    /// Lower-case name as stored in plans
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(format!("Unknown difficulty: '{s}' (use easy, medium or hard)")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subject at a position in the caller's priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSubject {
    /// Subject name
    pub name: String,
    /// Position in the priority order (0 = highest priority)
    pub priority_rank: usize,
    /// Perceived difficulty
    pub difficulty: Difficulty,
    /// Whether the subject was already mastered
    pub is_completed: bool,
}

impl RankedSubject {
    /// Create a ranked subject
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        priority_rank: usize,
        difficulty: Difficulty,
        is_completed: bool,
    ) -> Self {
        Self {
            name: name.into(),
            priority_rank,
            difficulty,
            is_completed,
        }
    }

    /// Rank an ordered subject list using per-subject difficulty and completion lookups.
    ///
    /// Subjects missing from `difficulties` default to [`Difficulty::Medium`].
    #[must_use]
    pub fn rank<S: AsRef<str>>(
        names: &[S],
        difficulties: &HashMap<String, Difficulty>,
        completed: &HashSet<String>,
    ) -> Vec<Self> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let name = name.as_ref();
                Self::new(
                    name,
                    idx,
                    difficulties.get(name).copied().unwrap_or_default(),
                    completed.contains(name),
                )
            })
            .collect()
    }
}
