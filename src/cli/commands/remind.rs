//! Reminder command handlers
//!
//! `remind` prints the deliveries due now as JSON for the push sender and
//! writes the updated ledger back; `subscribe` registers an endpoint.

use super::{read_json, read_json_or_default, write_json, CommandError};
use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use std::path::Path;
use study_planner::config::Config;
use study_planner::core::models::ClassPeriod;
use study_planner::core::reminders::{decide_notifications, SentLedger, Subscription, SubscriptionList};

/// Run the remind command
pub fn run(
    timetable: &Path,
    subscriptions: &Path,
    ledger_path: Option<&Path>,
    at: Option<NaiveDateTime>,
    config: &Config,
) -> Result<(), CommandError> {
    let periods: Vec<ClassPeriod> = read_json(timetable)?;
    let subs: SubscriptionList = read_json_or_default(subscriptions)?;
    let ledger: SentLedger = match ledger_path {
        Some(path) => read_json_or_default(path)?,
        None => SentLedger::default(),
    };

    let now = at.unwrap_or_else(|| Local::now().naive_local());
    debug!(
        "Checking {} periods against {} subscriptions at {now}",
        periods.len(),
        subs.len()
    );

    let (deliveries, ledger) = decide_notifications(
        &periods,
        subs.as_slice(),
        now,
        ledger,
        config.planner.reminder_lead_minutes,
    );
    info!("{} reminder(s) due at {now}", deliveries.len());

    let json = serde_json::to_string_pretty(&deliveries).map_err(|source| CommandError::Json {
        path: timetable.to_path_buf(),
        source,
    })?;
    println!("{json}");

    if let Some(path) = ledger_path {
        write_json(path, &ledger)?;
    }
    Ok(())
}

/// Run the subscribe command
pub fn subscribe(subscriptions: &Path, endpoint: &str) -> Result<(), CommandError> {
    let mut subs: SubscriptionList = read_json_or_default(subscriptions)?;
    if subs.add(Subscription::new(endpoint.trim()))? {
        write_json(subscriptions, &subs)?;
        info!("Registered subscription {endpoint}");
        println!("✓ Subscribed: {endpoint}");
    } else {
        println!("✓ Already subscribed: {endpoint}");
    }
    Ok(())
}
