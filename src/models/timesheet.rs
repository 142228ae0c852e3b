use crate::core::calculator::week::WeekWindow;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimesheetStatus {
    NotSubmitted,
    Submitted,
    Approved,
    Rejected,
}

/// Approver / staff actions that move a timesheet through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimesheetAction {
    Submit,
    Approve,
    Reject,
}

impl TimesheetAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimesheetAction::Submit => "submit",
            TimesheetAction::Approve => "approve",
            TimesheetAction::Reject => "reject",
        }
    }
}

impl TimesheetStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TimesheetStatus::NotSubmitted => "NOT_SUBMITTED",
            TimesheetStatus::Submitted => "SUBMITTED",
            TimesheetStatus::Approved => "APPROVED",
            TimesheetStatus::Rejected => "REJECTED",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "NOT_SUBMITTED" => Some(TimesheetStatus::NotSubmitted),
            "SUBMITTED" => Some(TimesheetStatus::Submitted),
            "APPROVED" => Some(TimesheetStatus::Approved),
            "REJECTED" => Some(TimesheetStatus::Rejected),
            _ => None,
        }
    }

    /// Lifecycle:
    /// NOT_SUBMITTED | SUBMITTED | REJECTED --submit--> SUBMITTED
    /// SUBMITTED --approve--> APPROVED
    /// SUBMITTED --reject-->  REJECTED
    pub fn apply(self, action: TimesheetAction) -> AppResult<TimesheetStatus> {
        use TimesheetAction::*;
        use TimesheetStatus::*;

        match (self, action) {
            (NotSubmitted | Submitted | Rejected, Submit) => Ok(Submitted),
            (Submitted, Approve) => Ok(Approved),
            (Submitted, Reject) => Ok(Rejected),
            (from, action) => Err(AppError::InvalidTransition {
                from: from.to_string(),
                action: action.as_str().to_string(),
            }),
        }
    }
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl FromStr for TimesheetStatus {
    type Err = AppError;

    /// Accepts `APPROVED`, `approved`, `not-submitted`, `not_submitted`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Self::from_db_str(&normalized).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Timesheet {
    pub id: i64,
    pub tenant_id: i64,
    pub staff_id: i64,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub total_ms: i64,
    pub status: TimesheetStatus,
    pub approver: Option<String>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl Timesheet {
    /// A timesheet that exists only in memory (not yet submitted).
    pub fn for_window(window: &WeekWindow, status: TimesheetStatus) -> Self {
        Self {
            id: 0,
            tenant_id: 0,
            staff_id: 0,
            period_start: window.start,
            period_end: window.end,
            total_ms: 0,
            status,
            approver: None,
            rejection_reason: None,
            notes: None,
            submitted_at: None,
            decided_at: None,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.total_ms as f64 / 3_600_000.0
    }

    pub fn window(&self) -> WeekWindow {
        WeekWindow {
            start: self.period_start,
            end: self.period_end,
        }
    }
}
