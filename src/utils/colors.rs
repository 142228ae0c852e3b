//! ANSI color helpers for terminal output.
use crate::models::incident::Severity;
use crate::models::timesheet::TimesheetStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// Surplus color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_surplus(value: i64) -> &'static str {
    if value > 0 {
        GREEN
    } else if value < 0 {
        RED
    } else {
        RESET
    }
}

pub fn color_for_status(status: TimesheetStatus) -> &'static str {
    match status {
        TimesheetStatus::NotSubmitted => GREY,
        TimesheetStatus::Submitted => BLUE,
        TimesheetStatus::Approved => GREEN,
        TimesheetStatus::Rejected => RED,
    }
}

pub fn color_for_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => GREY,
        Severity::Medium => YELLOW,
        Severity::High => MAGENTA,
        Severity::Critical => RED,
    }
}
