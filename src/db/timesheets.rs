use crate::core::calculator::PeriodMatch;
use crate::core::calculator::status::period_matches;
use crate::core::calculator::week::WeekWindow;
use crate::db::queries::{opt_ts_column, ts_column};
use crate::errors::{AppError, AppResult};
use crate::models::timesheet::{Timesheet, TimesheetStatus};
use crate::utils::time::to_db;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_timesheet(row: &Row) -> rusqlite::Result<Timesheet> {
    let status_str: String = row.get("status")?;
    let status = TimesheetStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(Timesheet {
        id: row.get("id")?,
        tenant_id: row.get("tenant_id")?,
        staff_id: row.get("staff_id")?,
        period_start: ts_column(row, "period_start")?,
        period_end: ts_column(row, "period_end")?,
        total_ms: row.get("total_ms")?,
        status,
        approver: row.get("approver")?,
        rejection_reason: row.get("rejection_reason")?,
        notes: row.get("notes")?,
        submitted_at: opt_ts_column(row, "submitted_at")?,
        decided_at: opt_ts_column(row, "decided_at")?,
    })
}

/// Every timesheet a staff member has on file, newest week first.
pub fn load_staff_timesheets(conn: &Connection, staff_id: i64) -> AppResult<Vec<Timesheet>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM timesheets WHERE staff_id = ?1 ORDER BY period_start DESC",
    )?;
    let rows = stmt.query_map([staff_id], map_timesheet)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Timesheet whose period starts on the calendar date `week_start`.
pub fn find_for_week(
    conn: &Connection,
    staff_id: i64,
    week_start: NaiveDate,
) -> AppResult<Option<Timesheet>> {
    let ts = conn
        .query_row(
            "SELECT * FROM timesheets
             WHERE staff_id = ?1 AND substr(period_start, 1, 10) = ?2
             LIMIT 1",
            params![staff_id, week_start.format("%Y-%m-%d").to_string()],
            map_timesheet,
        )
        .optional()?;
    Ok(ts)
}

/// Status-only lookup for a week (the "standalone" status of the week view).
/// The stored period must match `window` under `mode`.
pub fn load_status_for_week(
    conn: &Connection,
    staff_id: i64,
    window: &WeekWindow,
    mode: PeriodMatch,
) -> AppResult<Option<TimesheetStatus>> {
    Ok(find_for_week(conn, staff_id, window.start_date())?
        .filter(|t| period_matches(t, window, mode))
        .map(|t| t.status))
}

/// Is there an approved timesheet covering `ts` for this staff member?
pub fn is_locked_at(conn: &Connection, staff_id: i64, ts: &DateTime<Utc>) -> AppResult<bool> {
    let at = to_db(ts);
    let found = conn
        .query_row(
            "SELECT 1 FROM timesheets
             WHERE staff_id = ?1 AND status = 'APPROVED'
               AND period_start <= ?2 AND period_end >= ?2
             LIMIT 1",
            params![staff_id, at],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Create or refresh the SUBMITTED row of a week. Clears any previous decision.
pub fn upsert_submitted(
    conn: &Connection,
    tenant_id: i64,
    staff_id: i64,
    window: &WeekWindow,
    total_ms: i64,
    notes: Option<&str>,
    submitted_at: &DateTime<Utc>,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO timesheets
            (tenant_id, staff_id, period_start, period_end, total_ms, status,
             approver, rejection_reason, notes, submitted_at, decided_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 'SUBMITTED', NULL, NULL, ?6, ?7, NULL)
         ON CONFLICT (tenant_id, staff_id, period_start) DO UPDATE SET
            period_end       = excluded.period_end,
            total_ms         = excluded.total_ms,
            status           = 'SUBMITTED',
            approver         = NULL,
            rejection_reason = NULL,
            notes            = excluded.notes,
            submitted_at     = excluded.submitted_at,
            decided_at       = NULL",
        params![
            tenant_id,
            staff_id,
            to_db(&window.start),
            to_db(&window.end),
            total_ms,
            notes,
            to_db(submitted_at),
        ],
    )?;
    Ok(())
}

pub fn record_decision(
    conn: &Connection,
    timesheet_id: i64,
    status: TimesheetStatus,
    approver: &str,
    reason: Option<&str>,
    decided_at: &DateTime<Utc>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE timesheets
         SET status = ?1, approver = ?2, rejection_reason = ?3, decided_at = ?4
         WHERE id = ?5",
        params![
            status.to_db_str(),
            approver,
            reason,
            to_db(decided_at),
            timesheet_id
        ],
    )?;
    Ok(())
}

/// Listing / export query with optional filters.
pub fn list_timesheets(
    conn: &Connection,
    tenant_id: i64,
    staff_id: Option<i64>,
    status: Option<TimesheetStatus>,
    bounds: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AppResult<Vec<Timesheet>> {
    let (from, to) = match bounds {
        Some((f, t)) => (to_db(&f), to_db(&t)),
        None => ("0000".to_string(), "9999".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT * FROM timesheets
         WHERE tenant_id = ?1
           AND (?2 IS NULL OR staff_id = ?2)
           AND (?3 IS NULL OR status = ?3)
           AND period_start BETWEEN ?4 AND ?5
         ORDER BY period_start ASC, staff_id ASC",
    )?;

    let rows = stmt.query_map(
        params![tenant_id, staff_id, status.map(|s| s.to_db_str()), from, to],
        map_timesheet,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
