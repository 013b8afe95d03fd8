//! Integration tests for timetable parsing

use std::collections::HashSet;
use std::fs;
use study_planner::core::error::ScheduleError;
use study_planner::core::models::{ClassPeriod, DayOfWeek, TimeSlot};
use study_planner::core::timetable::{
    is_lab_subject, SlotTable, SubjectVocabulary, TimetableParser, STANDARD_SUBJECTS,
};

const SAMPLE: &str = "samples/timetables/cse_3rd_sem.txt";

fn parser() -> TimetableParser {
    TimetableParser::standard().expect("standard tables are valid")
}

fn on_day(periods: &[ClassPeriod], day: DayOfWeek) -> Vec<&ClassPeriod> {
    periods.iter().filter(|p| p.day_index == day).collect()
}

fn subjects(periods: &[&ClassPeriod]) -> Vec<String> {
    periods.iter().map(|p| p.subject.clone()).collect()
}

fn sample_periods() -> Vec<ClassPeriod> {
    let text = fs::read_to_string(SAMPLE).expect("sample timetable exists");
    parser().parse(&text)
}

#[test]
fn test_monday_with_lab() {
    let periods = parser().parse("MONDAY DSA OS LAB ENGLISH");

    let summary: Vec<_> = periods
        .iter()
        .map(|p| (p.subject.as_str(), p.start_time.as_str(), p.end_time.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("DSA", "08:30", "09:25"),
            ("OS LAB", "09:25", "11:35"),
            ("ENGLISH", "11:35", "12:30"),
        ]
    );
    assert!(periods.iter().all(|p| p.day_index == DayOfWeek::Monday));
}

#[test]
fn test_empty_text_yields_nothing() {
    assert!(parser().parse("").is_empty());
    assert!(parser().parse("   \n\n  ").is_empty());
}

#[test]
fn test_text_without_headers_yields_nothing() {
    assert!(parser().parse("DSA OS LAB ENGLISH\nMAT DDCO").is_empty());
}

#[test]
fn test_sample_week() {
    let periods = sample_periods();

    assert_eq!(
        subjects(&on_day(&periods, DayOfWeek::Monday)),
        vec!["DSA", "OS LAB", "ENGLISH", "MAT", "DDCO"]
    );
    assert_eq!(
        subjects(&on_day(&periods, DayOfWeek::Tuesday)),
        vec!["DDCO", "MAT", "DS LAB", "OOPS", "YOGA"]
    );
    assert_eq!(
        subjects(&on_day(&periods, DayOfWeek::Wednesday)),
        vec!["OS", "DSA", "CRC", "PROCTORING"]
    );

    // eight subjects, seven slots
    let thursday = on_day(&periods, DayOfWeek::Thursday);
    assert_eq!(thursday.len(), 7);
    assert!(!subjects(&thursday).contains(&"DDCO".to_string()));
    assert_eq!(thursday[6].end_time, "16:10");

    assert_eq!(
        subjects(&on_day(&periods, DayOfWeek::Friday)),
        vec!["PROJECT"]
    );

    // the Sunday line folds into Saturday's block
    assert_eq!(
        subjects(&on_day(&periods, DayOfWeek::Saturday)),
        vec!["YOGA"]
    );
    assert!(on_day(&periods, DayOfWeek::Sunday).is_empty());
}

#[test]
fn test_only_teaching_days_appear() {
    let periods = sample_periods();
    assert!(!periods.is_empty());
    assert!(periods
        .iter()
        .all(|p| DayOfWeek::TIMETABLE_DAYS.contains(&p.day_index)));
    assert!(periods.iter().all(|p| p.day_index.index() != 0));
}

#[test]
fn test_slots_increase_within_each_day() {
    let periods = sample_periods();
    let slots = SlotTable::standard();

    for day in DayOfWeek::TIMETABLE_DAYS {
        let day_periods = on_day(&periods, day);
        let positions: Vec<usize> = day_periods
            .iter()
            .map(|p| slots.position_of_start(&p.start_time).expect("start is a slot start"))
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "{day}: {positions:?}"
        );

        let starts: HashSet<_> = day_periods.iter().map(|p| &p.start_time).collect();
        assert_eq!(starts.len(), day_periods.len());
    }
}

#[test]
fn test_labs_span_two_slots() {
    let periods = sample_periods();
    let slots = SlotTable::standard();
    let last = slots.len() - 1;

    let labs: Vec<_> = periods.iter().filter(|p| is_lab_subject(&p.subject)).collect();
    assert_eq!(labs.len(), 2);

    for lab in labs {
        let start = slots.position_of_start(&lab.start_time).unwrap();
        let end = slots.position_of_end(&lab.end_time).unwrap();
        if start == last {
            assert_eq!(end, last);
        } else {
            assert_eq!(end, start + 1, "{}", lab.subject);
        }
    }
}

#[test]
fn test_only_vocabulary_subjects_appear() {
    let periods = sample_periods();
    let vocabulary: HashSet<&str> = STANDARD_SUBJECTS.into_iter().collect();
    assert!(periods.iter().all(|p| vocabulary.contains(p.subject.as_str())));
}

#[test]
fn test_ids_are_unique() {
    let periods = sample_periods();
    let ids: HashSet<_> = periods.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), periods.len());
    assert_eq!(periods[0].id, "d1s0");
}

#[test]
fn test_repeated_day_header_keeps_ids_unique() {
    let periods = parser().parse("MONDAY DSA\nTUESDAY OS\nMONDAY JAVA");

    let ids: HashSet<_> = periods.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), periods.len());

    let monday = on_day(&periods, DayOfWeek::Monday);
    assert_eq!(subjects(&monday), vec!["DSA", "JAVA"]);
    assert_eq!(monday[1].start_time, "09:25");
}

#[test]
fn test_periods_serialize_in_camel_case() {
    let periods = parser().parse("FRIDAY PROJECT");
    let json = serde_json::to_value(&periods).unwrap();

    assert_eq!(json[0]["id"], "d5s0");
    assert_eq!(json[0]["dayIndex"], 5);
    assert_eq!(json[0]["subject"], "PROJECT");
    assert_eq!(json[0]["startTime"], "08:30");
    assert_eq!(json[0]["endTime"], "09:25");

    let back: Vec<ClassPeriod> = serde_json::from_value(json).unwrap();
    assert_eq!(back, periods);
}

#[test]
fn test_custom_vocabulary_and_slots() {
    let vocabulary = SubjectVocabulary::new(["BIOLOGY", "CHEM LAB"]).unwrap();
    let slots = SlotTable::new(vec![
        TimeSlot::new("07:00", "08:00"),
        TimeSlot::new("08:00", "09:00"),
    ])
    .unwrap();
    let parser = TimetableParser::new(vocabulary, slots);

    let periods = parser.parse("monday biology chem lab\ntuesday Chem Lab");
    assert_eq!(periods.len(), 3);

    // lab squeezed into the final slot
    assert_eq!(periods[1].subject, "CHEM LAB");
    assert_eq!(periods[1].start_time, "08:00");
    assert_eq!(periods[1].end_time, "09:00");

    assert_eq!(periods[2].day_index, DayOfWeek::Tuesday);
    assert_eq!(periods[2].end_time, "09:00");
}

#[test]
fn test_invalid_tables_are_rejected() {
    assert!(SubjectVocabulary::new(["DSA", "  "]).is_err());
    assert!(SlotTable::new(Vec::new()).is_err());
    assert!(SlotTable::new(vec![TimeSlot::new("9am", "10am")]).is_err());
    assert!(SlotTable::new(vec![TimeSlot::new("10:00", "09:00")]).is_err());

    let overlapping = SlotTable::new(vec![
        TimeSlot::new("10:00", "11:00"),
        TimeSlot::new("09:00", "12:00"),
        TimeSlot::new("10:00", "11:00"),
    ]);
    assert!(matches!(
        overlapping,
        Err(ScheduleError::OverlappingSlots { .. })
    ));
}
