//! Timetable command handler
//!
//! Parses OCR text into class periods, saves them as JSON and optionally
//! renders a report.

use super::{output_path, read_text, write_json, write_report, CommandError};
use log::{info, warn};
use std::path::Path;
use study_planner::config::Config;
use study_planner::core::models::DayOfWeek;
use study_planner::core::report::ReportContext;
use study_planner::verbose;

/// Run the timetable command
pub fn run(
    input_file: &Path,
    output: Option<&Path>,
    report: Option<&str>,
    config: &Config,
) -> Result<(), CommandError> {
    let text = read_text(input_file)?;
    let parser = config.timetable_parser()?;

    let periods = parser.parse(&text);
    info!(
        "Parsed {} class periods from {}",
        periods.len(),
        input_file.display()
    );
    if periods.is_empty() {
        warn!("No classes recognised in {}", input_file.display());
    }

    let stem = input_file
        .file_stem()
        .map_or_else(|| "timetable".to_string(), |s| s.to_string_lossy().to_string());

    let out = output_path(output, &config.paths.timetables_dir, &stem, "json");
    write_json(&out, &periods)?;
    println!("✓ Timetable saved: {} ({} periods)", out.display(), periods.len());

    for day in DayOfWeek::TIMETABLE_DAYS {
        let subjects: Vec<&str> = periods
            .iter()
            .filter(|p| p.day_index == day)
            .map(|p| p.subject.as_str())
            .collect();
        if !subjects.is_empty() {
            verbose!("  {:<9} {}", day.label(), subjects.join(", "));
        }
    }

    if let Some(format) = report {
        let ctx = ReportContext::Timetable {
            periods: &periods,
            slots: parser.slots().slots(),
        };
        let path = write_report(&ctx, format, &stem, config)?;
        info!("Timetable report written to {}", path.display());
        println!("✓ Report generated: {}", path.display());
    }

    Ok(())
}
