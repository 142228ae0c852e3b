use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::calculator::week_window_for_date;
use crate::core::timesheet::TimesheetLogic;
use crate::db::tenants::{find_staff, list_staff};
use crate::db::timesheets::list_timesheets;
use crate::errors::{AppError, AppResult};
use crate::models::timesheet::TimesheetStatus;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::date::reference_date;
use crate::utils::formatting::ms2hours;
use crate::utils::table::{Column, Table};
use std::collections::HashMap;

/// `submit`, `approve`, `reject` and `timesheets`.
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let mut pool = ctx.open_pool()?;
    let now = ctx.now();

    match cmd {
        Commands::Submit { staff, date, notes } => {
            let (tenant, staff) = ctx.staff(&pool, staff)?;
            let window = week_window_for_date(reference_date(date.as_ref(), now)?);

            let ts =
                TimesheetLogic::submit(&mut pool, &tenant, &staff, window, now, notes.as_deref())?;
            success(format!(
                "Timesheet of {} for week {} submitted: {} h",
                staff.code,
                window,
                ms2hours(ts.total_ms)
            ));
        }

        Commands::Approve { staff, date, by } => {
            let (tenant, staff) = ctx.staff(&pool, staff)?;
            let window = week_window_for_date(reference_date(date.as_ref(), now)?);

            let ts = TimesheetLogic::approve(&mut pool, &tenant, &staff, window, by, now)?;
            success(format!(
                "Timesheet of {} for week {} {} by {}",
                staff.code, window, ts.status, by
            ));
        }

        Commands::Reject {
            staff,
            date,
            by,
            reason,
        } => {
            let (tenant, staff) = ctx.staff(&pool, staff)?;
            let window = week_window_for_date(reference_date(date.as_ref(), now)?);

            let ts = TimesheetLogic::reject(&mut pool, &tenant, &staff, window, by, reason, now)?;
            warning(format!(
                "Timesheet of {} for week {} {} by {}: {}",
                staff.code,
                window,
                ts.status,
                by,
                reason.trim()
            ));
        }

        Commands::Timesheets { staff, status } => {
            let tenant = ctx.tenant(&pool)?;

            let staff_id = match staff {
                Some(code) => Some(
                    find_staff(&pool.conn, tenant.id, code)?
                        .ok_or_else(|| AppError::UnknownStaff(code.clone()))?
                        .id,
                ),
                None => None,
            };
            let status = status
                .as_deref()
                .map(str::parse::<TimesheetStatus>)
                .transpose()?;

            let rows = list_timesheets(&pool.conn, tenant.id, staff_id, status, None)?;
            header(format!("Timesheets of {}", tenant.name));
            if rows.is_empty() {
                info("No timesheets found.");
                return Ok(());
            }

            let codes: HashMap<i64, String> = list_staff(&pool.conn, tenant.id)?
                .into_iter()
                .map(|s| (s.id, s.code))
                .collect();

            let mut table = Table::new(
                vec![
                    Column::right("ID"),
                    Column::left("STAFF"),
                    Column::left("WEEK"),
                    Column::right("HOURS"),
                    Column::left("STATUS"),
                    Column::left("BY"),
                    Column::left("NOTE"),
                ],
                ctx.cfg.separator(),
            );
            for ts in rows {
                let note = ts
                    .rejection_reason
                    .clone()
                    .or_else(|| ts.notes.clone())
                    .unwrap_or_default();
                table.add_row(vec![
                    ts.id.to_string(),
                    codes.get(&ts.staff_id).cloned().unwrap_or_default(),
                    ts.window().to_string(),
                    ms2hours(ts.total_ms),
                    ts.status.to_string(),
                    ts.approver.clone().unwrap_or_else(|| "-".into()),
                    note,
                ]);
            }
            print!("{}", table.render());
        }

        _ => {}
    }

    Ok(())
}
