//! Clock-in / clock-out / breaks.
//!
//! The pure calculator tolerates inverted intervals (they clamp to zero);
//! this layer refuses to store them in the first place.

use crate::core::calculator::week_window;
use crate::db::log::{AuditOp, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries::{close_break, insert_break, insert_entry, load_open_entry, set_clock_out};
use crate::db::timesheets::is_locked_at;
use crate::errors::{AppError, AppResult};
use crate::models::tenant::{Staff, Tenant};
use crate::models::time_entry::{Break, TimeEntry};
use crate::utils::time::{short, to_db};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

pub struct ClockLogic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakPhase {
    Start,
    End,
}

fn ensure_interval(start: &DateTime<Utc>, end: &DateTime<Utc>) -> AppResult<()> {
    if end < start {
        return Err(AppError::InvalidInterval {
            start: to_db(start),
            end: to_db(end),
        });
    }
    Ok(())
}

/// Entries belonging to an approved week are frozen.
fn ensure_unlocked(conn: &Connection, staff: &Staff, entry: &TimeEntry) -> AppResult<()> {
    if is_locked_at(conn, staff.id, &entry.clock_in)? {
        let window = week_window(entry.clock_in);
        return Err(AppError::PeriodLocked(window.start_date().to_string()));
    }
    Ok(())
}

fn open_entry_of(conn: &Connection, staff: &Staff) -> AppResult<TimeEntry> {
    load_open_entry(conn, staff.id)?.ok_or_else(|| AppError::NotClockedIn(staff.code.clone()))
}

fn target(tenant: &Tenant, staff: &Staff) -> String {
    format!("{}/{}", tenant.slug, staff.code)
}

impl ClockLogic {
    pub fn clock_in(
        pool: &mut DbPool,
        tenant: &Tenant,
        staff: &Staff,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<TimeEntry> {
        if !staff.active {
            return Err(AppError::InactiveStaff(staff.code.clone()));
        }

        if let Some(open) = load_open_entry(&pool.conn, staff.id)? {
            return Err(AppError::AlreadyClockedIn(
                staff.code.clone(),
                short(&open.clock_in),
            ));
        }

        if is_locked_at(&pool.conn, staff.id, &at)? {
            return Err(AppError::PeriodLocked(week_window(at).start_date().to_string()));
        }

        pool.with_tx(|tx| {
            let entry = insert_entry(tx, tenant.id, staff.id, &at, &now)?;
            ttlog(
                tx,
                &now,
                AuditOp::ClockIn,
                &target(tenant, staff),
                &format!("Clocked in at {}", to_db(&at)),
            )?;
            Ok(entry)
        })
    }

    /// Close the open entry. A break still running ends at the same instant.
    pub fn clock_out(
        pool: &mut DbPool,
        tenant: &Tenant,
        staff: &Staff,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<TimeEntry> {
        let mut entry = open_entry_of(&pool.conn, staff)?;
        ensure_unlocked(&pool.conn, staff, &entry)?;
        ensure_interval(&entry.clock_in, &at)?;

        let open_break = entry.breaks.iter().position(|b| b.is_open());
        if let Some(idx) = open_break {
            ensure_interval(&entry.breaks[idx].start, &at)?;
        }

        pool.with_tx(|tx| {
            if let Some(idx) = open_break {
                close_break(tx, entry.breaks[idx].id, &at)?;
            }
            set_clock_out(tx, entry.id, &at)?;
            ttlog(
                tx,
                &now,
                AuditOp::ClockOut,
                &target(tenant, staff),
                &format!("Clocked out at {}", to_db(&at)),
            )
        })?;

        if let Some(idx) = open_break {
            entry.breaks[idx].end = Some(at);
        }
        entry.clock_out = Some(at);
        Ok(entry)
    }

    pub fn start_break(
        pool: &mut DbPool,
        tenant: &Tenant,
        staff: &Staff,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<TimeEntry> {
        let mut entry = open_entry_of(&pool.conn, staff)?;
        ensure_unlocked(&pool.conn, staff, &entry)?;

        if let Some(b) = entry.open_break() {
            return Err(AppError::BreakAlreadyOpen(staff.code.clone(), short(&b.start)));
        }
        ensure_interval(&entry.clock_in, &at)?;

        let id = pool.with_tx(|tx| {
            let id = insert_break(tx, entry.id, &at)?;
            ttlog(
                tx,
                &now,
                AuditOp::BreakStart,
                &target(tenant, staff),
                &format!("Break started at {}", to_db(&at)),
            )?;
            Ok::<_, AppError>(id)
        })?;

        entry.breaks.push(Break {
            id,
            start: at,
            end: None,
        });
        Ok(entry)
    }

    pub fn end_break(
        pool: &mut DbPool,
        tenant: &Tenant,
        staff: &Staff,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<TimeEntry> {
        let mut entry = open_entry_of(&pool.conn, staff)?;
        ensure_unlocked(&pool.conn, staff, &entry)?;

        let idx = entry
            .breaks
            .iter()
            .rposition(|b| b.is_open())
            .ok_or_else(|| AppError::NoOpenBreak(staff.code.clone()))?;
        ensure_interval(&entry.breaks[idx].start, &at)?;

        let break_id = entry.breaks[idx].id;
        pool.with_tx(|tx| {
            close_break(tx, break_id, &at)?;
            ttlog(
                tx,
                &now,
                AuditOp::BreakEnd,
                &target(tenant, staff),
                &format!("Break ended at {}", to_db(&at)),
            )
        })?;

        entry.breaks[idx].end = Some(at);
        Ok(entry)
    }

    pub fn apply_break(
        pool: &mut DbPool,
        tenant: &Tenant,
        staff: &Staff,
        phase: BreakPhase,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<TimeEntry> {
        match phase {
            BreakPhase::Start => Self::start_break(pool, tenant, staff, at, now),
            BreakPhase::End => Self::end_break(pool, tenant, staff, at, now),
        }
    }
}
