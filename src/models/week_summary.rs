use crate::core::calculator::week::WeekWindow;
use crate::models::time_entry::TimeEntry;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct EntryLine {
    pub entry: TimeEntry,
    pub working_ms: i64,
    pub break_ms: i64,
    pub open: bool,
}

#[derive(Debug, Clone)]
pub struct WeekSummary {
    pub window: WeekWindow,
    pub lines: Vec<EntryLine>,
    pub per_day: BTreeMap<NaiveDate, i64>,
    pub total_ms: i64,
    pub expected_ms: i64,
    pub surplus_ms: i64,
}

impl WeekSummary {
    pub fn has_open_entries(&self) -> bool {
        self.lines.iter().any(|l| l.open)
    }
}
