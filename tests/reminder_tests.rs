//! Integration tests for class reminders

use chrono::{NaiveDate, NaiveDateTime};
use study_planner::core::models::ClassPeriod;
use study_planner::core::reminders::{
    decide_notifications, reminder_key, SentLedger, Subscription, SubscriptionList,
    DEFAULT_LEAD_MINUTES, REMINDER_TITLE,
};
use study_planner::core::timetable::TimetableParser;

// 2026-10-19 is a Monday
fn monday_at(time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("2026-10-19 {time}"), "%Y-%m-%d %H:%M").unwrap()
}

fn week() -> Vec<ClassPeriod> {
    TimetableParser::standard()
        .unwrap()
        .parse("MONDAY DSA OS LAB ENGLISH\nTUESDAY MAT")
}

fn subscriptions(endpoints: &[&str]) -> Vec<Subscription> {
    let mut list = SubscriptionList::new();
    for endpoint in endpoints {
        list.add(Subscription::new(*endpoint)).unwrap();
    }
    list.as_slice().to_vec()
}

#[test]
fn test_reminder_sent_once_per_subscription() {
    let periods = week();
    let subs = subscriptions(&["https://push.example/a", "https://push.example/b"]);

    let (deliveries, ledger) = decide_notifications(
        &periods,
        &subs,
        monday_at("08:26"),
        SentLedger::default(),
        DEFAULT_LEAD_MINUTES,
    );

    assert_eq!(deliveries.len(), 2);
    assert!(deliveries.iter().all(|d| d.payload.title == REMINDER_TITLE));
    assert!(deliveries.iter().all(|d| d.payload.body == "DSA at 08:30"));
    assert_eq!(deliveries[0].endpoint, "https://push.example/a");
    assert_eq!(deliveries[1].endpoint, "https://push.example/b");
    assert!(ledger.contains(&reminder_key(&periods[0])));
    assert_eq!(ledger.day, NaiveDate::from_ymd_opt(2026, 10, 19));

    // the next tick inside the same window sends nothing new
    let (again, ledger) =
        decide_notifications(&periods, &subs, monday_at("08:28"), ledger, DEFAULT_LEAD_MINUTES);
    assert!(again.is_empty());
    assert_eq!(ledger.keys.len(), 1);
}

#[test]
fn test_window_edges() {
    let periods = week();
    let subs = subscriptions(&["https://push.example/a"]);
    let send = |time: &str| {
        decide_notifications(
            &periods,
            &subs,
            monday_at(time),
            SentLedger::default(),
            DEFAULT_LEAD_MINUTES,
        )
        .0
    };

    assert_eq!(send("08:25").len(), 1);
    assert_eq!(send("08:30").len(), 1);
    assert!(send("08:24").is_empty());
    assert!(send("08:31").is_empty());
    assert_eq!(send("09:20")[0].payload.data.subject, "OS LAB");
}

#[test]
fn test_other_days_are_ignored() {
    let periods = week();
    let subs = subscriptions(&["https://push.example/a"]);

    // Tuesday's MAT starts at 08:30, but it is Monday
    let (deliveries, _) = decide_notifications(
        &periods,
        &subs,
        monday_at("08:27"),
        SentLedger::default(),
        DEFAULT_LEAD_MINUTES,
    );
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].payload.data.subject, "DSA");
}

#[test]
fn test_ledger_resets_on_new_day() {
    let periods = week();
    let subs = subscriptions(&["https://push.example/a"]);

    let (_, ledger) = decide_notifications(
        &periods,
        &subs,
        monday_at("08:26"),
        SentLedger::default(),
        DEFAULT_LEAD_MINUTES,
    );
    assert!(!ledger.keys.is_empty());

    let next_monday =
        NaiveDateTime::parse_from_str("2026-10-26 08:27", "%Y-%m-%d %H:%M").unwrap();
    let (deliveries, ledger) =
        decide_notifications(&periods, &subs, next_monday, ledger, DEFAULT_LEAD_MINUTES);

    assert_eq!(deliveries.len(), 1);
    assert_eq!(ledger.day, NaiveDate::from_ymd_opt(2026, 10, 26));
    assert_eq!(ledger.keys.len(), 1);
}

#[test]
fn test_no_subscriptions_records_nothing() {
    let periods = week();
    let (deliveries, ledger) = decide_notifications(
        &periods,
        &[],
        monday_at("08:26"),
        SentLedger::default(),
        DEFAULT_LEAD_MINUTES,
    );
    assert!(deliveries.is_empty());
    assert!(ledger.keys.is_empty());
}

#[test]
fn test_payload_and_ledger_json_shape() {
    let periods = week();
    let subs = subscriptions(&["https://push.example/a"]);
    let (deliveries, ledger) = decide_notifications(
        &periods,
        &subs,
        monday_at("08:26"),
        SentLedger::default(),
        DEFAULT_LEAD_MINUTES,
    );

    let payload = serde_json::to_value(&deliveries[0].payload).unwrap();
    assert_eq!(payload["title"], "Class starting soon");
    assert_eq!(payload["body"], "DSA at 08:30");
    assert_eq!(payload["data"]["subject"], "DSA");
    assert_eq!(payload["data"]["startTime"], "08:30");

    let stored = serde_json::to_string(&ledger).unwrap();
    let restored: SentLedger = serde_json::from_str(&stored).unwrap();
    assert_eq!(restored, ledger);

    let list: SubscriptionList = serde_json::from_str(
        r#"[{"endpoint": "https://push.example/a", "keys": {"auth": "x", "p256dh": "y"}}]"#,
    )
    .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.as_slice()[0].keys["auth"], "x");
}
