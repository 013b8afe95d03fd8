//! OCR text to class periods
//!
//! Scanned timetables come back from OCR as loosely ordered lines where each
//! day header (MONDAY … SATURDAY) is followed by that day's cells. The parser
//! gathers each day's text into a block, picks known subjects out of it and
//! lays them onto the slot table in order. Labs take two slots.

use super::{SlotTable, SubjectMatch, SubjectVocabulary};
use crate::core::error::ScheduleError;
use crate::core::models::{ClassPeriod, DayOfWeek};

/// Number of consecutive slots a lab occupies
pub const LAB_SPAN: usize = 2;

/// Converts raw timetable OCR text into class periods
#[derive(Debug, Clone)]
pub struct TimetableParser {
    vocabulary: SubjectVocabulary,
    slots: SlotTable,
}

impl TimetableParser {
    /// Create a parser for a given vocabulary and slot table
    #[must_use]
    pub const fn new(vocabulary: SubjectVocabulary, slots: SlotTable) -> Self {
        Self { vocabulary, slots }
    }

    /// Parser using the standard subject list and seven-period day
    ///
    /// # Errors
    /// Returns an error only if the standard vocabulary fails to compile.
    pub fn standard() -> Result<Self, ScheduleError> {
        Ok(Self::new(SubjectVocabulary::standard()?, SlotTable::standard()))
    }

    /// Subject vocabulary in use
    #[must_use]
    pub const fn vocabulary(&self) -> &SubjectVocabulary {
        &self.vocabulary
    }

    /// Slot table in use
    #[must_use]
    pub const fn slots(&self) -> &SlotTable {
        &self.slots
    }

    /// Parse OCR text into class periods.
    ///
    /// Never fails: text without any day header yields an empty list, and
    /// lines before the first header are ignored. A header repeated later in
    /// the text continues that day's block, so each day is laid out once.
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<ClassPeriod> {
        // day blocks in first-seen order
        let mut blocks: Vec<(DayOfWeek, String)> = Vec::new();
        let mut current: Option<usize> = None;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (idx, content) = match DayOfWeek::strip_header(line) {
                Some((day, rest)) => {
                    let idx = match blocks.iter().position(|(seen, _)| *seen == day) {
                        Some(idx) => idx,
                        None => {
                            blocks.push((day, String::new()));
                            blocks.len() - 1
                        }
                    };
                    (idx, rest.trim())
                }
                None => match current {
                    Some(idx) => (idx, line),
                    None => continue,
                },
            };

            current = Some(idx);
            let block = &mut blocks[idx].1;
            block.push_str(content);
            block.push(' ');
        }

        let mut periods = Vec::new();
        for (day, block) in &blocks {
            self.flush_day(*day, block, &mut periods);
        }
        periods
    }

    /// Recognise a day block's subjects and append their periods
    fn flush_day(&self, day: DayOfWeek, block: &str, periods: &mut Vec<ClassPeriod>) {
        let subjects = self.vocabulary.extract(block);
        periods.extend(self.lay_out(day, &subjects));
    }

    /// Place subjects onto consecutive slots, one per subject and two per lab.
    ///
    /// Stops when either subjects or slots run out. A lab starting in the last
    /// slot is cut down to that slot.
    fn lay_out(&self, day: DayOfWeek, subjects: &[SubjectMatch<'_>]) -> Vec<ClassPeriod> {
        let slots = self.slots.slots();
        let last = slots.len().saturating_sub(1);
        let mut periods = Vec::new();
        let mut slot = 0;

        for subject in subjects {
            if slot >= slots.len() {
                break;
            }

            let span = if subject.is_lab { LAB_SPAN } else { 1 };
            let end_slot = (slot + span - 1).min(last);

            periods.push(ClassPeriod {
                id: ClassPeriod::make_id(day, slot),
                day_index: day,
                subject: subject.name.to_string(),
                start_time: slots[slot].start.clone(),
                end_time: slots[end_slot].end.clone(),
            });

            slot += span;
        }

        periods
    }
}
