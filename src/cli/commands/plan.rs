//! Plan command handler
//!
//! Ranks the requested subjects, builds a phased study plan and saves it.

use super::{output_path, write_json, write_report, CommandError};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use study_planner::config::Config;
use study_planner::core::models::{Difficulty, RankedSubject, StudyPlan};
use study_planner::core::report::ReportContext;
use study_planner::verbose;

/// Arguments of the plan command
#[derive(Debug)]
pub struct PlanArgs<'a> {
    /// Subjects in priority order
    pub subjects: &'a [String],
    /// Difficulty per subject
    pub difficulty: &'a [(String, Difficulty)],
    /// Mastered subjects
    pub completed: &'a [String],
    /// Total days
    pub days: u32,
    /// Hours per day, if given
    pub hours: Option<f64>,
    /// Follow-up phase order, empty to reuse `subjects`
    pub followup_subjects: &'a [String],
    /// Follow-up phase difficulty overrides
    pub followup_difficulty: &'a [(String, Difficulty)],
    /// Explicit output path
    pub output: Option<&'a Path>,
    /// Report format
    pub report: Option<&'a str>,
}

fn clean_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty() && seen.insert(n.clone()))
        .collect()
}

fn rank(
    names: &[String],
    difficulty: &HashMap<String, Difficulty>,
    completed: &HashSet<String>,
) -> Vec<RankedSubject> {
    for name in difficulty.keys().filter(|k| !names.contains(k)) {
        warn!("Difficulty given for '{name}', which is not in the subject list");
    }
    RankedSubject::rank(names, difficulty, completed)
}

/// Run the plan command
pub fn run(args: &PlanArgs, config: &Config) -> Result<(), CommandError> {
    let subjects = clean_names(args.subjects);
    let completed: HashSet<String> = clean_names(args.completed).into_iter().collect();
    let difficulty: HashMap<String, Difficulty> = args.difficulty.iter().cloned().collect();

    let first = rank(&subjects, &difficulty, &completed);

    let followup = if args.followup_subjects.is_empty() && args.followup_difficulty.is_empty() {
        None
    } else {
        let names = if args.followup_subjects.is_empty() {
            subjects.clone()
        } else {
            clean_names(args.followup_subjects)
        };
        let mut levels = difficulty.clone();
        levels.extend(args.followup_difficulty.iter().cloned());
        Some(rank(&names, &levels, &completed))
    };

    let hours = args.hours.unwrap_or(config.planner.hours_per_day);
    debug!(
        "Planning {} subjects over {} days at {hours} h/day",
        first.len(),
        args.days
    );

    let planner = config.phase_planner()?;
    let plan = planner.plan(&first, followup.as_deref(), hours, args.days)?;
    info!(
        "Built a {}-day plan with {} phase(s)",
        plan.total_days,
        plan.phases.len()
    );

    let out = output_path(args.output, &config.paths.plans_dir, "study_plan", "json");
    write_json(&out, &plan)?;
    println!("✓ Study plan saved: {}", out.display());
    print_summary(&plan);

    if let Some(format) = args.report {
        let path = write_report(&ReportContext::Plan(&plan), format, "study_plan", config)?;
        info!("Plan report written to {}", path.display());
        println!("✓ Report generated: {}", path.display());
    }

    Ok(())
}

fn print_summary(plan: &StudyPlan) {
    for phase in &plan.phases {
        let (Some(first), Some(last), Some(day)) =
            (phase.first_day(), phase.last_day(), phase.days.first())
        else {
            continue;
        };
        verbose!("{} (days {first}-{last}):", phase.phase.label());
        for slot in &day.slots {
            verbose!("  {:<12} {:>4.1} h", slot.subject, slot.hours);
        }
        verbose!("  {:<12} {:>4.1} h", "total", day.total_hours());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_names_trims_and_dedupes() {
        let names = vec![
            " DSA ".to_string(),
            String::new(),
            "OS".to_string(),
            "DSA".to_string(),
        ];
        assert_eq!(clean_names(&names), vec!["DSA", "OS"]);
    }
}
