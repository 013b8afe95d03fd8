//! Suggest command handler

use super::{read_json, CommandError};
use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::path::Path;
use study_planner::core::tasks::{detect_conflicts, recommend_time_slots, sort_by_priority, Task};
use study_planner::verbose;

/// Run the suggest command
pub fn run(
    tasks_file: &Path,
    duration: f64,
    date: Option<NaiveDate>,
    check: Option<&str>,
) -> Result<(), CommandError> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(CommandError::InvalidArgument(format!(
            "duration must be a positive number of hours, got {duration}"
        )));
    }

    let mut tasks: Vec<Task> = read_json(tasks_file)?;
    sort_by_priority(&mut tasks);

    let date = date.unwrap_or_else(|| Local::now().date_naive());

    if let Some(id) = check {
        let task = tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CommandError::InvalidArgument(format!("no task with id '{id}'")))?;
        let conflicts = detect_conflicts(&tasks, task);
        if conflicts.is_empty() {
            println!("✓ '{}' has no scheduling conflicts", task.name);
        } else {
            warn!("'{}' overlaps {} task(s)", task.name, conflicts.len());
            for other in conflicts {
                println!("✗ Conflicts with '{}' ({})", other.name, other.id);
            }
        }
    }

    let open: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
    verbose!("Open tasks by priority:");
    for task in &open {
        verbose!("  [{:?}] {} ({} h)", task.priority, task.name, task.duration_hours);
    }

    let slots = recommend_time_slots(&tasks, duration, date);
    info!("{} free slot(s) found on {date}", slots.len());
    if slots.is_empty() {
        println!("✗ No free slot of {duration} h on {date}");
    }
    for slot in slots {
        println!(
            "✓ {}  score {:>3}  {}",
            slot.start.format("%Y-%m-%d %H:%M"),
            slot.score,
            slot.reason
        );
    }
    Ok(())
}
