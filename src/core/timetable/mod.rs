//! Timetable OCR text parsing
//!
//! Turns the raw text of a photographed weekly timetable into class periods,
//! using a configurable subject vocabulary and slot table.

pub mod parser;
pub mod slots;
pub mod vocabulary;

pub use parser::TimetableParser;
pub use slots::{standard_slots, SlotTable, STANDARD_SLOTS};
pub use vocabulary::{is_lab_subject, SubjectMatch, SubjectVocabulary, STANDARD_SUBJECTS};
