//! Class reminder decisions
//!
//! Deciding which reminders to send is a pure function of the timetable, the
//! registered subscriptions, the current time and a ledger of reminders
//! already sent today. The caller persists the returned ledger and hands it
//! back on the next poll; delivery itself belongs to the push service.

use crate::core::error::SubscriptionError;
use crate::core::models::{ClassPeriod, DayOfWeek};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default number of minutes before a class that its reminder becomes due
pub const DEFAULT_LEAD_MINUTES: u32 = 5;

/// Title used on every class reminder
pub const REMINDER_TITLE: &str = "Class starting soon";

/// A registered push subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Push service endpoint, unique per device
    pub endpoint: String,
    /// Encryption keys as handed out by the browser
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keys: BTreeMap<String, String>,
}

impl Subscription {
    /// Subscription with no keys
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            keys: BTreeMap::new(),
        }
    }
}

/// Subscriptions, unique by endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionList {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionList {
    /// Empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Register a subscription. Returns `false` if the endpoint is already known.
    ///
    /// # Errors
    /// Returns an error if the endpoint is blank.
    pub fn add(&mut self, subscription: Subscription) -> Result<bool, SubscriptionError> {
        if subscription.endpoint.trim().is_empty() {
            return Err(SubscriptionError::BlankEndpoint);
        }
        if self
            .subscriptions
            .iter()
            .any(|s| s.endpoint == subscription.endpoint)
        {
            return Ok(false);
        }
        self.subscriptions.push(subscription);
        Ok(true)
    }

    /// Registered subscriptions
    #[must_use]
    pub fn as_slice(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Number of subscriptions
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether no subscription is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

/// Reminders already sent on one calendar day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentLedger {
    /// Day the keys belong to
    pub day: Option<NaiveDate>,
    /// `"{dayIndex}-{startTime}-{subject}"` keys
    pub keys: BTreeSet<String>,
}

impl SentLedger {
    /// Ledger for `date`: kept as is on the same day, emptied otherwise
    #[must_use]
    pub fn for_day(self, date: NaiveDate) -> Self {
        if self.day == Some(date) {
            self
        } else {
            Self {
                day: Some(date),
                keys: BTreeSet::new(),
            }
        }
    }

    /// Whether a reminder with this key was sent
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// Data attached to a reminder for the client to act on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderData {
    /// Subject of the class
    pub subject: String,
    /// Class start time, `HH:MM`
    pub start_time: String,
}

/// Push payload for one class reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderPayload {
    /// Notification title
    pub title: String,
    /// Notification body, e.g. "DSA at 08:30"
    pub body: String,
    /// Structured data
    pub data: ReminderData,
}

impl ReminderPayload {
    /// Payload announcing `period`
    #[must_use]
    pub fn for_period(period: &ClassPeriod) -> Self {
        Self {
            title: REMINDER_TITLE.to_string(),
            body: format!("{} at {}", period.subject, period.start_time),
            data: ReminderData {
                subject: period.subject.clone(),
                start_time: period.start_time.clone(),
            },
        }
    }
}

/// One reminder to push to one subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Target subscription endpoint
    pub endpoint: String,
    /// What to send
    pub payload: ReminderPayload,
}

/// Ledger key identifying a period's reminder
#[must_use]
pub fn reminder_key(period: &ClassPeriod) -> String {
    format!(
        "{}-{}-{}",
        period.day_index.index(),
        period.start_time,
        period.subject
    )
}

/// Decide which reminders are due at `now`.
///
/// A period is due when it is on today's weekday and starts between `now`
/// and `now + lead_minutes` (inclusive, whole minutes). Each due period not
/// yet in the ledger produces one delivery per subscription and is recorded.
/// With no subscriptions nothing is sent or recorded.
#[must_use]
pub fn decide_notifications(
    periods: &[ClassPeriod],
    subscriptions: &[Subscription],
    now: NaiveDateTime,
    ledger: SentLedger,
    lead_minutes: u32,
) -> (Vec<Delivery>, SentLedger) {
    let mut ledger = ledger.for_day(now.date());
    let mut deliveries = Vec::new();

    if subscriptions.is_empty() {
        return (deliveries, ledger);
    }

    let today = DayOfWeek::from(now.weekday());
    let now_minutes = i64::from(now.hour() * 60 + now.minute());

    for period in periods.iter().filter(|p| p.day_index == today) {
        let Some(start) = period.start() else {
            continue;
        };
        let diff = i64::from(start.hour() * 60 + start.minute()) - now_minutes;
        if diff < 0 || diff > i64::from(lead_minutes) {
            continue;
        }

        let key = reminder_key(period);
        if !ledger.keys.insert(key) {
            continue;
        }

        let payload = ReminderPayload::for_period(period);
        deliveries.extend(subscriptions.iter().map(|sub| Delivery {
            endpoint: sub.endpoint.clone(),
            payload: payload.clone(),
        }));
    }

    (deliveries, ledger)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M").unwrap()
    }

    fn period(day: DayOfWeek, subject: &str, start: &str, end: &str) -> ClassPeriod {
        ClassPeriod {
            id: format!("d{}s0", day.index()),
            day_index: day,
            subject: subject.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    #[test]
    fn test_subscription_list_dedupes_by_endpoint() {
        let mut list = SubscriptionList::new();
        assert_eq!(list.add(Subscription::new("https://push/a")), Ok(true));
        assert_eq!(list.add(Subscription::new("https://push/a")), Ok(false));
        assert_eq!(list.add(Subscription::new("https://push/b")), Ok(true));
        assert_eq!(
            list.add(Subscription::new("  ")),
            Err(SubscriptionError::BlankEndpoint)
        );
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_ledger_resets_on_new_day() {
        let day1 = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();

        let mut ledger = SentLedger::default().for_day(day1);
        ledger.keys.insert("1-08:30-DSA".to_string());

        let same = ledger.clone().for_day(day1);
        assert!(same.contains("1-08:30-DSA"));

        let next = ledger.for_day(day2);
        assert!(next.keys.is_empty());
        assert_eq!(next.day, Some(day2));
    }

    #[test]
    fn test_due_window() {
        // 2026-10-19 is a Monday
        let periods = vec![period(DayOfWeek::Monday, "DSA", "08:30", "09:25")];
        let subs = vec![Subscription::new("https://push/a")];

        for (time, due) in [("08:24", false), ("08:25", true), ("08:30", true), ("08:31", false)] {
            let (sent, _) = decide_notifications(
                &periods,
                &subs,
                at("2026-10-19", time),
                SentLedger::default(),
                DEFAULT_LEAD_MINUTES,
            );
            assert_eq!(!sent.is_empty(), due, "at {time}");
        }
    }

    #[test]
    fn test_payload_contents() {
        let periods = vec![period(DayOfWeek::Monday, "OS LAB", "09:25", "11:35")];
        let subs = vec![Subscription::new("https://push/a")];
        let (sent, ledger) = decide_notifications(
            &periods,
            &subs,
            at("2026-10-19", "09:22"),
            SentLedger::default(),
            DEFAULT_LEAD_MINUTES,
        );

        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].endpoint, "https://push/a");
        assert_eq!(sent[0].payload.title, REMINDER_TITLE);
        assert_eq!(sent[0].payload.body, "OS LAB at 09:25");
        assert_eq!(sent[0].payload.data.start_time, "09:25");
        assert!(ledger.contains("1-09:25-OS LAB"));
    }

    #[test]
    fn test_no_subscriptions_records_nothing() {
        let periods = vec![period(DayOfWeek::Monday, "DSA", "08:30", "09:25")];
        let (sent, ledger) = decide_notifications(
            &periods,
            &[],
            at("2026-10-19", "08:28"),
            SentLedger::default(),
            DEFAULT_LEAD_MINUTES,
        );
        assert!(sent.is_empty());
        assert!(ledger.keys.is_empty());
    }

    #[test]
    fn test_unparseable_start_time_is_skipped() {
        let periods = vec![period(DayOfWeek::Monday, "DSA", "8.30", "09:25")];
        let subs = vec![Subscription::new("https://push/a")];
        let (sent, _) = decide_notifications(
            &periods,
            &subs,
            at("2026-10-19", "08:28"),
            SentLedger::default(),
            DEFAULT_LEAD_MINUTES,
        );
        assert!(sent.is_empty());
    }
}
