//! Ordered period table of an institution's teaching day

use crate::core::error::ScheduleError;
use crate::core::models::{parse_clock_time, TimeSlot};
use chrono::NaiveTime;

/// Period boundaries of the standard teaching day. Breaks fall after the
/// second and fourth periods.
pub const STANDARD_SLOTS: [(&str, &str); 7] = [
    ("08:30", "09:25"),
    ("09:25", "10:20"),
    ("10:40", "11:35"),
    ("11:35", "12:30"),
    ("13:25", "14:20"),
    ("14:20", "15:15"),
    ("15:15", "16:10"),
];

/// Validated, ordered list of time slots
///
/// Slots are consumed in list order. Consecutive slots need not touch in wall
/// clock time (breaks are allowed), but each slot must start before it ends
/// and no earlier than the previous slot ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTable {
    slots: Vec<TimeSlot>,
}

impl SlotTable {
    /// Build a slot table, validating every boundary
    ///
    /// # Errors
    /// Returns an error if the list is empty, a boundary is not `HH:MM`,
    /// a slot does not start before it ends, or a slot starts before the
    /// previous one has ended.
    pub fn new(slots: Vec<TimeSlot>) -> Result<Self, ScheduleError> {
        if slots.is_empty() {
            return Err(ScheduleError::NoSlots);
        }

        let mut previous: Option<(&TimeSlot, NaiveTime)> = None;
        for slot in &slots {
            let start = parse_clock_time(&slot.start)
                .ok_or_else(|| ScheduleError::InvalidTime(slot.start.clone()))?;
            let end = parse_clock_time(&slot.end)
                .ok_or_else(|| ScheduleError::InvalidTime(slot.end.clone()))?;
            if start >= end {
                return Err(ScheduleError::InvertedSlot {
                    start: slot.start.clone(),
                    end: slot.end.clone(),
                });
            }
            if let Some((prev, prev_end)) = previous {
                if start < prev_end {
                    return Err(ScheduleError::OverlappingSlots {
                        previous: format!("{}-{}", prev.start, prev.end),
                        next: format!("{}-{}", slot.start, slot.end),
                    });
                }
            }
            previous = Some((slot, end));
        }

        Ok(Self { slots })
    }

    /// The institution's standard seven-period day
    #[must_use]
    pub fn standard() -> Self {
        Self {
            slots: standard_slots(),
        }
    }

    /// Number of slots in the day
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; a table holds at least one slot
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at a zero-based position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TimeSlot> {
        self.slots.get(index)
    }

    /// All slots in order
    #[must_use]
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Position of the slot starting at `start`
    #[must_use]
    pub fn position_of_start(&self, start: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.start == start)
    }

    /// Position of the slot ending at `end`
    #[must_use]
    pub fn position_of_end(&self, end: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.end == end)
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// The standard slots as owned values (used for config defaults)
#[must_use]
pub fn standard_slots() -> Vec<TimeSlot> {
    STANDARD_SLOTS
        .iter()
        .map(|(start, end)| TimeSlot::new(*start, *end))
        .collect()
}
