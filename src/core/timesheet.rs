use crate::core::calculator::status::period_matches;
use crate::core::calculator::{PeriodMatch, WeekWindow, reconcile_status};
use crate::core::logic::Core;
use crate::db::log::{AuditOp, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries::load_entries_between;
use crate::db::timesheets::{
    find_for_week, load_staff_timesheets, load_status_for_week, record_decision, upsert_submitted,
};
use crate::errors::{AppError, AppResult};
use crate::models::tenant::{Staff, Tenant};
use crate::models::timesheet::{Timesheet, TimesheetAction, TimesheetStatus};
use crate::models::week_summary::WeekSummary;
use crate::ui::messages::warning;
use crate::utils::formatting::ms2hours;
use crate::utils::time::short;
use chrono::{DateTime, Utc};

/// What the `week` command shows: the aggregate plus the reconciled status.
pub struct WeekView {
    pub summary: WeekSummary,
    pub status: TimesheetStatus,
    pub timesheet: Option<Timesheet>,
}

pub struct TimesheetLogic;

impl TimesheetLogic {
    pub fn summarize(
        pool: &DbPool,
        staff: &Staff,
        window: WeekWindow,
        now: DateTime<Utc>,
        expected_ms: i64,
    ) -> AppResult<WeekSummary> {
        let entries = load_entries_between(&pool.conn, staff.id, &window.start, &window.end)?;
        Ok(Core::build_week_summary(&entries, window, now, expected_ms))
    }

    pub fn week_view(
        pool: &DbPool,
        staff: &Staff,
        window: WeekWindow,
        now: DateTime<Utc>,
        expected_ms: i64,
        mode: PeriodMatch,
    ) -> AppResult<WeekView> {
        let summary = Self::summarize(pool, staff, window, now, expected_ms)?;

        let submitted = load_staff_timesheets(&pool.conn, staff.id)?;
        let standalone = load_status_for_week(&pool.conn, staff.id, &window, mode)?;
        let status = reconcile_status(&submitted, standalone, &window, mode);

        let timesheet = submitted
            .into_iter()
            .find(|t| period_matches(t, &window, mode));

        Ok(WeekView {
            summary,
            status,
            timesheet,
        })
    }

    /// Lifecycle guard: any row stored for the week counts, whatever its exact bounds.
    fn current_status(
        pool: &DbPool,
        staff: &Staff,
        window: &WeekWindow,
    ) -> AppResult<TimesheetStatus> {
        Ok(
            load_status_for_week(&pool.conn, staff.id, window, PeriodMatch::CalendarDate)?
                .unwrap_or(TimesheetStatus::NotSubmitted),
        )
    }

    /// Create or refresh the week's timesheet as SUBMITTED.
    pub fn submit(
        pool: &mut DbPool,
        tenant: &Tenant,
        staff: &Staff,
        window: WeekWindow,
        now: DateTime<Utc>,
        notes: Option<&str>,
    ) -> AppResult<Timesheet> {
        Self::current_status(pool, staff, &window)?.apply(TimesheetAction::Submit)?;

        let summary = Self::summarize(pool, staff, window, now, 0)?;
        if summary.has_open_entries() {
            warning(format!(
                "{} has a shift still open in this week: it is counted up to {}.",
                staff.code,
                now.format("%Y-%m-%d %H:%M")
            ));
        }

        let notes = notes.map(str::trim).filter(|n| !n.is_empty());

        pool.with_tx(|tx| {
            upsert_submitted(tx, tenant.id, staff.id, &window, summary.total_ms, notes, &now)?;
            ttlog(
                tx,
                &now,
                AuditOp::Submit,
                &format!("{}/{}", tenant.slug, staff.code),
                &format!("Week {} submitted: {} h", window, ms2hours(summary.total_ms)),
            )
        })?;

        find_for_week(&pool.conn, staff.id, window.start_date())?
            .ok_or_else(|| AppError::NoTimesheet(window.start_date().to_string()))
    }

    pub fn approve(
        pool: &mut DbPool,
        tenant: &Tenant,
        staff: &Staff,
        window: WeekWindow,
        approver: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Timesheet> {
        Self::decide(pool, tenant, staff, window, TimesheetAction::Approve, approver, None, now)
    }

    pub fn reject(
        pool: &mut DbPool,
        tenant: &Tenant,
        staff: &Staff,
        window: WeekWindow,
        approver: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Timesheet> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::MissingReason);
        }
        Self::decide(
            pool,
            tenant,
            staff,
            window,
            TimesheetAction::Reject,
            approver,
            Some(reason),
            now,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn decide(
        pool: &mut DbPool,
        tenant: &Tenant,
        staff: &Staff,
        window: WeekWindow,
        action: TimesheetAction,
        approver: &str,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Timesheet> {
        let mut ts = find_for_week(&pool.conn, staff.id, window.start_date())?
            .ok_or_else(|| AppError::NoTimesheet(window.start_date().to_string()))?;

        let next = ts.status.apply(action)?;

        // every shift of the week must be closed before approval
        if action == TimesheetAction::Approve {
            let entries = load_entries_between(&pool.conn, staff.id, &window.start, &window.end)?;
            if let Some(open) = entries.iter().find(|e| e.is_open()) {
                return Err(AppError::OpenShift(staff.code.clone(), short(&open.clock_in)));
            }
        }

        let approver = approver.trim();
        let op = match action {
            TimesheetAction::Reject => AuditOp::Reject,
            _ => AuditOp::Approve,
        };

        pool.with_tx(|tx| {
            record_decision(tx, ts.id, next, approver, reason, &now)?;
            let msg = match reason {
                Some(r) => format!("Week {} {} by {}: {}", window, next, approver, r),
                None => format!("Week {} {} by {}", window, next, approver),
            };
            ttlog(tx, &now, op, &format!("{}/{}", tenant.slug, staff.code), &msg)
        })?;

        ts.status = next;
        ts.approver = Some(approver.to_string());
        ts.rejection_reason = reason.map(str::to_string);
        ts.decided_at = Some(now);
        Ok(ts)
    }
}
