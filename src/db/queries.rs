//! Time entry and break queries.

use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{Break, TimeEntry};
use crate::utils::time::{from_db, to_db};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

pub(crate) fn ts_column(row: &Row, col: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(col)?;
    from_db(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(raw.clone())),
        )
    })
}

pub(crate) fn opt_ts_column(row: &Row, col: &str) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        None => Ok(None),
        Some(s) => from_db(&s).map(Some).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTimestamp(s.clone())),
            )
        }),
    }
}

/// Row → TimeEntry without breaks (filled by `attach_breaks`).
fn map_entry(row: &Row) -> rusqlite::Result<TimeEntry> {
    Ok(TimeEntry {
        id: row.get("id")?,
        tenant_id: row.get("tenant_id")?,
        staff_id: row.get("staff_id")?,
        clock_in: ts_column(row, "clock_in")?,
        clock_out: opt_ts_column(row, "clock_out")?,
        breaks: Vec::new(),
    })
}

fn map_break(row: &Row) -> rusqlite::Result<Break> {
    Ok(Break {
        id: row.get("id")?,
        start: ts_column(row, "start_at")?,
        end: opt_ts_column(row, "end_at")?,
    })
}

pub fn load_breaks(conn: &Connection, entry_id: i64) -> AppResult<Vec<Break>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, start_at, end_at FROM breaks WHERE entry_id = ?1 ORDER BY start_at ASC, id ASC",
    )?;
    let rows = stmt.query_map([entry_id], map_break)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn attach_breaks(conn: &Connection, mut entries: Vec<TimeEntry>) -> AppResult<Vec<TimeEntry>> {
    for e in entries.iter_mut() {
        e.breaks = load_breaks(conn, e.id)?;
    }
    Ok(entries)
}

pub fn insert_entry(
    conn: &Connection,
    tenant_id: i64,
    staff_id: i64,
    clock_in: &DateTime<Utc>,
    now: &DateTime<Utc>,
) -> AppResult<TimeEntry> {
    conn.execute(
        "INSERT INTO time_entries (tenant_id, staff_id, clock_in, clock_out, created_at)
         VALUES (?1, ?2, ?3, NULL, ?4)",
        params![tenant_id, staff_id, to_db(clock_in), to_db(now)],
    )?;

    Ok(TimeEntry {
        id: conn.last_insert_rowid(),
        tenant_id,
        staff_id,
        clock_in: *clock_in,
        clock_out: None,
        breaks: Vec::new(),
    })
}

/// The most recent entry without clock-out, if any.
pub fn load_open_entry(conn: &Connection, staff_id: i64) -> AppResult<Option<TimeEntry>> {
    let entry = conn
        .query_row(
            "SELECT * FROM time_entries
             WHERE staff_id = ?1 AND clock_out IS NULL
             ORDER BY clock_in DESC
             LIMIT 1",
            [staff_id],
            map_entry,
        )
        .optional()?;

    match entry {
        None => Ok(None),
        Some(mut e) => {
            e.breaks = load_breaks(conn, e.id)?;
            Ok(Some(e))
        }
    }
}

/// Entries of a staff member whose clock-in lies in `[from, to]` (inclusive).
pub fn load_entries_between(
    conn: &Connection,
    staff_id: i64,
    from: &DateTime<Utc>,
    to: &DateTime<Utc>,
) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_entries
         WHERE staff_id = ?1 AND clock_in BETWEEN ?2 AND ?3
         ORDER BY clock_in ASC",
    )?;

    let rows = stmt.query_map(params![staff_id, to_db(from), to_db(to)], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    attach_breaks(conn, out)
}

/// Entries of one staff member, optionally bounded (used by `entries --period all`).
pub fn load_staff_entries(
    conn: &Connection,
    staff_id: i64,
    bounds: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AppResult<Vec<TimeEntry>> {
    match bounds {
        Some((from, to)) => load_entries_between(conn, staff_id, &from, &to),
        None => {
            let mut stmt = conn.prepare(
                "SELECT * FROM time_entries WHERE staff_id = ?1 ORDER BY clock_in ASC",
            )?;
            let rows = stmt.query_map([staff_id], map_entry)?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            attach_breaks(conn, out)
        }
    }
}

/// All entries of a tenant, optionally bounded, for export.
pub fn load_tenant_entries(
    conn: &Connection,
    tenant_id: i64,
    bounds: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AppResult<Vec<TimeEntry>> {
    let (from, to) = match bounds {
        Some((f, t)) => (to_db(&f), to_db(&t)),
        None => ("0000".to_string(), "9999".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT * FROM time_entries
         WHERE tenant_id = ?1 AND clock_in BETWEEN ?2 AND ?3
         ORDER BY clock_in ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![tenant_id, from, to], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    attach_breaks(conn, out)
}

pub fn set_clock_out(conn: &Connection, entry_id: i64, clock_out: &DateTime<Utc>) -> AppResult<()> {
    conn.execute(
        "UPDATE time_entries SET clock_out = ?1 WHERE id = ?2",
        params![to_db(clock_out), entry_id],
    )?;
    Ok(())
}

pub fn insert_break(conn: &Connection, entry_id: i64, start: &DateTime<Utc>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO breaks (entry_id, start_at, end_at) VALUES (?1, ?2, NULL)",
        params![entry_id, to_db(start)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn close_break(conn: &Connection, break_id: i64, end: &DateTime<Utc>) -> AppResult<()> {
    conn.execute(
        "UPDATE breaks SET end_at = ?1 WHERE id = ?2",
        params![to_db(end), break_id],
    )?;
    Ok(())
}
