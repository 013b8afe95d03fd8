//! Day-of-week model
//!
//! One canonical day type for the whole crate. Stored periods carry the day as
//! an integer index (Monday=1 … Saturday=6, Sunday=0), and calendar code talks
//! `chrono::Weekday`; both sides convert through this enum explicitly.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DayOfWeek {
    /// Monday (index 1)
    Monday,
    /// Tuesday (index 2)
    Tuesday,
    /// Wednesday (index 3)
    Wednesday,
    /// Thursday (index 4)
    Thursday,
    /// Friday (index 5)
    Friday,
    /// Saturday (index 6)
    Saturday,
    /// Sunday (index 0)
    Sunday,
}

impl DayOfWeek {
    /// Days that can head a block in a scanned timetable, in header order.
    /// Sunday is never a teaching day.
    pub const TIMETABLE_DAYS: [Self; 6] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Stored index of the day (Monday=1 … Saturday=6, Sunday=0)
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    /// Look up a day by its stored index
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Sunday),
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            _ => None,
        }
    }

    /// Upper-case header text as it appears on a timetable (e.g. "MONDAY")
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        }
    }

    /// Display label (e.g. "Monday")
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// If `line` starts with a timetable day header (ASCII case-insensitive),
    /// return the day and the rest of the line after the header.
    #[must_use]
    pub fn strip_header(line: &str) -> Option<(Self, &str)> {
        Self::TIMETABLE_DAYS.into_iter().find_map(|day| {
            let header = day.header();
            let prefix = line.get(..header.len())?;
            if prefix.eq_ignore_ascii_case(header) {
                Some((day, &line[header.len()..]))
            } else {
                None
            }
        })
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Self::Mon,
            DayOfWeek::Tuesday => Self::Tue,
            DayOfWeek::Wednesday => Self::Wed,
            DayOfWeek::Thursday => Self::Thu,
            DayOfWeek::Friday => Self::Fri,
            DayOfWeek::Saturday => Self::Sat,
            DayOfWeek::Sunday => Self::Sun,
        }
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.index()
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or_else(|| format!("invalid day index {index}, expected 0-6"))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
