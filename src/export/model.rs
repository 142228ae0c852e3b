// src/export/model.rs

use crate::models::incident::Incident;
use crate::models::timesheet::Timesheet;
use crate::models::week_summary::EntryLine;
use crate::utils::formatting::{ms2hours, ms2readable};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Export timestamps: `YYYY-MM-DD HH:MM:SS` (UTC), recognised as dates by spreadsheets.
fn export_ts(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn export_opt_ts(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(export_ts).unwrap_or_default()
}

/// A flat record that every writer (CSV, JSON, XLSX, PDF) can render.
pub(crate) trait ExportRow: Serialize {
    const HEADERS: &'static [&'static str];

    fn to_row(&self) -> Vec<String>;

    /// Column indexes right-aligned in the PDF table.
    fn numeric_columns() -> &'static [usize] {
        &[]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: i64,
    pub staff: String,
    pub clock_in: String,
    pub clock_out: String,
    pub breaks: usize,
    pub break_minutes: i64,
    pub worked_minutes: i64,
    pub worked: String,
}

impl EntryExport {
    pub fn from_line(line: &EntryLine, staff_code: &str) -> Self {
        Self {
            id: line.entry.id,
            staff: staff_code.to_string(),
            clock_in: export_ts(&line.entry.clock_in),
            clock_out: export_opt_ts(line.entry.clock_out.as_ref()),
            breaks: line.entry.breaks.len(),
            break_minutes: line.break_ms / 60_000,
            worked_minutes: line.working_ms / 60_000,
            worked: ms2readable(line.working_ms, false, false),
        }
    }
}

impl ExportRow for EntryExport {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "staff",
        "clock_in",
        "clock_out",
        "breaks",
        "break_minutes",
        "worked_minutes",
        "worked",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.staff.clone(),
            self.clock_in.clone(),
            self.clock_out.clone(),
            self.breaks.to_string(),
            self.break_minutes.to_string(),
            self.worked_minutes.to_string(),
            self.worked.clone(),
        ]
    }

    fn numeric_columns() -> &'static [usize] {
        &[0, 4, 5, 6, 7]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct TimesheetExport {
    pub id: i64,
    pub staff: String,
    pub period_start: String,
    pub period_end: String,
    pub hours: String,
    pub status: String,
    pub approver: String,
    pub rejection_reason: String,
    pub notes: String,
    pub submitted_at: String,
    pub decided_at: String,
}

impl TimesheetExport {
    pub fn from_timesheet(ts: &Timesheet, staff_code: &str) -> Self {
        Self {
            id: ts.id,
            staff: staff_code.to_string(),
            period_start: ts.period_start.format("%Y-%m-%d").to_string(),
            period_end: ts.period_end.format("%Y-%m-%d").to_string(),
            hours: ms2hours(ts.total_ms),
            status: ts.status.to_db_str().to_string(),
            approver: ts.approver.clone().unwrap_or_default(),
            rejection_reason: ts.rejection_reason.clone().unwrap_or_default(),
            notes: ts.notes.clone().unwrap_or_default(),
            submitted_at: export_opt_ts(ts.submitted_at.as_ref()),
            decided_at: export_opt_ts(ts.decided_at.as_ref()),
        }
    }
}

impl ExportRow for TimesheetExport {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "staff",
        "period_start",
        "period_end",
        "hours",
        "status",
        "approver",
        "rejection_reason",
        "notes",
        "submitted_at",
        "decided_at",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.staff.clone(),
            self.period_start.clone(),
            self.period_end.clone(),
            self.hours.clone(),
            self.status.clone(),
            self.approver.clone(),
            self.rejection_reason.clone(),
            self.notes.clone(),
            self.submitted_at.clone(),
            self.decided_at.clone(),
        ]
    }

    fn numeric_columns() -> &'static [usize] {
        &[0, 4]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct IncidentExport {
    pub id: i64,
    pub title: String,
    pub severity: String,
    pub status: String,
    pub phi_involved: bool,
    pub affected_records: i64,
    pub reporter: String,
    pub occurred_at: String,
    pub reported_at: String,
    pub resolved_at: String,
    pub notification_deadline: String,
}

impl From<&Incident> for IncidentExport {
    fn from(inc: &Incident) -> Self {
        Self {
            id: inc.id,
            title: inc.title.clone(),
            severity: inc.severity.to_db_str().to_string(),
            status: inc.status.to_db_str().to_string(),
            phi_involved: inc.phi_involved,
            affected_records: inc.affected_records,
            reporter: inc.reporter.clone().unwrap_or_default(),
            occurred_at: export_ts(&inc.occurred_at),
            reported_at: export_ts(&inc.reported_at),
            resolved_at: export_opt_ts(inc.resolved_at.as_ref()),
            notification_deadline: export_opt_ts(inc.notification_deadline().as_ref()),
        }
    }
}

impl ExportRow for IncidentExport {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "title",
        "severity",
        "status",
        "phi_involved",
        "affected_records",
        "reporter",
        "occurred_at",
        "reported_at",
        "resolved_at",
        "notification_deadline",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.severity.clone(),
            self.status.clone(),
            if self.phi_involved { "yes" } else { "no" }.to_string(),
            self.affected_records.to_string(),
            self.reporter.clone(),
            self.occurred_at.clone(),
            self.reported_at.clone(),
            self.resolved_at.clone(),
            self.notification_deadline.clone(),
        ]
    }

    fn numeric_columns() -> &'static [usize] {
        &[0, 5]
    }
}

pub(crate) fn rows_to_table<R: ExportRow>(rows: &[R]) -> Vec<Vec<String>> {
    rows.iter().map(ExportRow::to_row).collect()
}
