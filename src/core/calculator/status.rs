//! Submission status of the displayed week.
//!
//! Resolution order:
//! 1. a submitted timesheet whose period matches the displayed window;
//! 2. the standalone status fetched for that week, if any;
//! 3. NOT_SUBMITTED.

use crate::core::calculator::week::WeekWindow;
use crate::models::timesheet::{Timesheet, TimesheetStatus};
use serde::{Deserialize, Serialize};

/// How a stored period is compared to the displayed window.
///
/// `Exact` compares both bounds instant-for-instant and is the default.
/// `CalendarDate` compares only the calendar dates of the bounds, which
/// tolerates millisecond or offset drift in stored periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodMatch {
    #[default]
    Exact,
    CalendarDate,
}

pub fn period_matches(ts: &Timesheet, window: &WeekWindow, mode: PeriodMatch) -> bool {
    match mode {
        PeriodMatch::Exact => ts.period_start == window.start && ts.period_end == window.end,
        PeriodMatch::CalendarDate => {
            ts.period_start.date_naive() == window.start.date_naive()
                && ts.period_end.date_naive() == window.end.date_naive()
        }
    }
}

pub fn reconcile_status(
    submitted: &[Timesheet],
    current: Option<TimesheetStatus>,
    window: &WeekWindow,
    mode: PeriodMatch,
) -> TimesheetStatus {
    submitted
        .iter()
        .find(|ts| period_matches(ts, window, mode))
        .map(|ts| ts.status)
        .or(current)
        .unwrap_or(TimesheetStatus::NotSubmitted)
}
