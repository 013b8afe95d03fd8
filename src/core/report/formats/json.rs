//! JSON report generator

use crate::core::error::ReportError;
use crate::core::report::{ReportContext, ReportGenerator};
use serde_json::json;

/// JSON report generator
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError> {
        let value = match *ctx {
            ReportContext::Timetable { periods, slots } => json!({
                "periods": periods,
                "slots": slots,
            }),
            ReportContext::Plan(plan) => serde_json::to_value(plan)?,
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
