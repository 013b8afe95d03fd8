//! HTML report generator
//!
//! Generates self-contained HTML pages with embedded CSS.

use crate::core::error::ReportError;
use crate::core::models::{StudyPlan, TimeSlot};
use crate::core::report::{
    group_by_day, phase_summaries, DaySchedule, PhaseSummary, ReportContext, ReportGenerator,
};
use askama::Template;

#[derive(Template)]
#[template(path = "timetable.html")]
struct TimetableTemplate<'a> {
    title: &'a str,
    period_count: usize,
    days: Vec<DaySchedule<'a>>,
    slots: &'a [TimeSlot],
}

#[derive(Template)]
#[template(path = "plan.html")]
struct PlanTemplate<'a> {
    title: &'a str,
    plan: &'a StudyPlan,
    phases: Vec<PhaseSummary<'a>>,
}

/// HTML report generator
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError> {
        let rendered = match *ctx {
            ReportContext::Timetable { periods, slots } => TimetableTemplate {
                title: ctx.title(),
                period_count: periods.len(),
                days: group_by_day(periods),
                slots,
            }
            .render()?,
            ReportContext::Plan(plan) => PlanTemplate {
                title: ctx.title(),
                plan,
                phases: phase_summaries(plan),
            }
            .render()?,
        };
        Ok(rendered)
    }
}
