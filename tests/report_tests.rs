//! Integration tests for report generation

use std::collections::{HashMap, HashSet};
use std::fs;
use study_planner::core::models::{Difficulty, RankedSubject, StudyPlan};
use study_planner::core::planner::PhasePlanner;
use study_planner::core::report::{
    HtmlReporter, JsonReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use study_planner::core::timetable::{SlotTable, TimetableParser};
use tempfile::TempDir;

fn sample_plan(names: &[&str]) -> StudyPlan {
    let difficulty = HashMap::from([(names[0].to_string(), Difficulty::Hard)]);
    let subjects = RankedSubject::rank(names, &difficulty, &HashSet::new());
    PhasePlanner::default()
        .plan(&subjects, None, 6.0, 8)
        .unwrap()
}

#[test]
fn test_markdown_timetable_report() {
    let periods = TimetableParser::standard()
        .unwrap()
        .parse("MONDAY DSA OS LAB\nWEDNESDAY CRC");
    let slots = SlotTable::standard();
    let ctx = ReportContext::Timetable {
        periods: &periods,
        slots: slots.slots(),
    };

    let report = MarkdownReporter::new().render(&ctx).unwrap();

    assert!(report.starts_with("# Weekly Timetable"));
    assert!(report.contains("3 classes across the week."));
    assert!(report.contains("## Monday"));
    assert!(report.contains("| 09:25-11:35 | OS LAB |"));
    assert!(report.contains("## Tuesday"));
    assert!(report.contains("_No classes_"));
    assert!(report.contains("| 7 | 15:15 | 16:10 |"));
}

#[test]
fn test_markdown_plan_report() {
    let plan = sample_plan(&["DSA", "OS"]);
    let report = MarkdownReporter::new()
        .render(&ReportContext::Plan(&plan))
        .unwrap();

    assert!(report.starts_with("# Study Plan"));
    assert!(report.contains("**Hours per day:** 6.0"));
    assert!(report.contains("**Total days:** 8"));
    assert!(report.contains("## Week 1 (days 1-6)"));
    assert!(report.contains("## Week 2 (days 7-8)"));
    assert!(report.contains("Priorities: DSA (hard), OS (medium)"));
    assert!(report.contains("| 1 | DSA | 4.3 |"));
    assert!(report.contains("| 8 | OS | 1.7 |"));
}

#[test]
fn test_html_report_escapes_names() {
    let plan = sample_plan(&["R&D <lab>", "OS"]);
    let report = HtmlReporter::new()
        .render(&ReportContext::Plan(&plan))
        .unwrap();

    assert!(report.starts_with("<!DOCTYPE html>"));
    assert!(report.contains("<title>Study Plan</title>"));
    assert!(report.contains("R&amp;D &lt;lab&gt;"));
    assert!(!report.contains("<lab>"));
}

#[test]
fn test_json_reports_parse_back() {
    let plan = sample_plan(&["DSA", "OS"]);
    let report = JsonReporter::new()
        .render(&ReportContext::Plan(&plan))
        .unwrap();
    let parsed: StudyPlan = serde_json::from_str(&report).unwrap();
    assert_eq!(parsed.total_days, plan.total_days);
    assert_eq!(parsed.phases.len(), 2);
    assert_eq!(parsed.phases[1].ranked_subjects, vec!["DSA", "OS"]);

    let periods = TimetableParser::standard().unwrap().parse("FRIDAY PROJECT");
    let slots = SlotTable::standard();
    let report = JsonReporter::new()
        .render(&ReportContext::Timetable {
            periods: &periods,
            slots: slots.slots(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["periods"][0]["subject"], "PROJECT");
    assert_eq!(value["slots"].as_array().map(Vec::len), Some(7));
}

#[test]
fn test_generate_writes_each_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let plan = sample_plan(&["DSA", "OS"]);
    let ctx = ReportContext::Plan(&plan);

    for format in [ReportFormat::Markdown, ReportFormat::Html, ReportFormat::Json] {
        let path = temp_dir
            .path()
            .join(format!("plan.{}", format.extension()));
        format.reporter().generate(&ctx, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("DSA"), "{format} report is missing subjects");
    }
}

#[test]
fn test_generate_reports_missing_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let plan = sample_plan(&["DSA"]);
    let path = temp_dir.path().join("missing").join("plan.md");

    assert!(MarkdownReporter::new()
        .generate(&ReportContext::Plan(&plan), &path)
        .is_err());
}
