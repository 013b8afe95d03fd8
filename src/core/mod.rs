//! Core module: timetable parsing, study planning and their supporting pieces

pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod reminders;
pub mod report;
pub mod tasks;
pub mod timetable;
