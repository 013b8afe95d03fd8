//! Library for `StudyPlanner`
//!
//! Turns OCR text of a weekly timetable into class periods, builds weighted
//! daily study plans, decides class reminders and suggests task slots.

pub mod core;
pub mod shared;

pub use core::config;
pub use shared::get_version;
