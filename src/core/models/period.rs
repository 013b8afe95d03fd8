//! Class period and time slot models

use super::DayOfWeek;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Parse an `HH:MM` 24-hour clock string
#[must_use]
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// One teaching period of the institution's day (e.g. 08:30–09:25)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Start time, `HH:MM`
    pub start: String,
    /// End time, `HH:MM`
    pub end: String,
}

impl TimeSlot {
    /// Create a new time slot
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A recognised class on a given day, produced by the timetable parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassPeriod {
    /// Unique per (day, slot): `d{dayIndex}s{slotIndex}`
    pub id: String,
    /// Day the class is held on
    pub day_index: DayOfWeek,
    /// Subject name from the vocabulary
    pub subject: String,
    /// Start of the first slot the class occupies
    pub start_time: String,
    /// End of the last slot the class occupies
    pub end_time: String,
}

impl ClassPeriod {
    /// Build the period id for a day and zero-based slot index
    #[must_use]
    pub fn make_id(day: DayOfWeek, slot_index: usize) -> String {
        format!("d{}s{slot_index}", day.index())
    }

    /// Parsed start time, if the stored string is a valid `HH:MM`
    #[must_use]
    pub fn start(&self) -> Option<NaiveTime> {
        parse_clock_time(&self.start_time)
    }

    /// Parsed end time, if the stored string is a valid `HH:MM`
    #[must_use]
    pub fn end(&self) -> Option<NaiveTime> {
        parse_clock_time(&self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(
            parse_clock_time("08:30"),
            NaiveTime::from_hms_opt(8, 30, 0)
        );
        assert_eq!(
            parse_clock_time(" 15:15 "),
            NaiveTime::from_hms_opt(15, 15, 0)
        );
        assert!(parse_clock_time("25:00").is_none());
        assert!(parse_clock_time("8.30").is_none());
        assert!(parse_clock_time("").is_none());
    }

    #[test]
    fn test_period_id_format() {
        assert_eq!(ClassPeriod::make_id(DayOfWeek::Monday, 0), "d1s0");
        assert_eq!(ClassPeriod::make_id(DayOfWeek::Saturday, 6), "d6s6");
    }

    #[test]
    fn test_period_json_shape() {
        let period = ClassPeriod {
            id: "d2s3".to_string(),
            day_index: DayOfWeek::Tuesday,
            subject: "DSA".to_string(),
            start_time: "11:35".to_string(),
            end_time: "12:30".to_string(),
        };

        let value = serde_json::to_value(&period).unwrap();
        assert_eq!(value["dayIndex"], 2);
        assert_eq!(value["startTime"], "11:35");
        assert_eq!(value["endTime"], "12:30");
        assert!(period.start().unwrap() < period.end().unwrap());
    }
}
