//! Internal audit trail: every state change writes one row to `log`.

use crate::errors::AppResult;
use crate::utils::time::to_db;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOp {
    Init,
    TenantAdd,
    StaffAdd,
    StaffDeactivate,
    ClockIn,
    ClockOut,
    BreakStart,
    BreakEnd,
    Submit,
    Approve,
    Reject,
    IncidentAdd,
    IncidentUpdate,
    Backup,
    Export,
}

impl AuditOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOp::Init => "init",
            AuditOp::TenantAdd => "tenant_add",
            AuditOp::StaffAdd => "staff_add",
            AuditOp::StaffDeactivate => "staff_deactivate",
            AuditOp::ClockIn => "clock_in",
            AuditOp::ClockOut => "clock_out",
            AuditOp::BreakStart => "break_start",
            AuditOp::BreakEnd => "break_end",
            AuditOp::Submit => "submit",
            AuditOp::Approve => "approve",
            AuditOp::Reject => "reject",
            AuditOp::IncidentAdd => "incident_add",
            AuditOp::IncidentUpdate => "incident_update",
            AuditOp::Backup => "backup",
            AuditOp::Export => "export",
        }
    }
}

/// Write an internal log line into the `log` table, dated `at`.
pub fn ttlog(
    conn: &Connection,
    at: &DateTime<Utc>,
    op: AuditOp,
    target: &str,
    message: &str,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![to_db(at), op.as_str(), target, message])?;

    Ok(())
}

#[derive(Debug, Clone)]
pub struct LogRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<LogRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, COALESCE(target, ''), message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogRow {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
