use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::calculator::week_window_for_date;
use crate::core::timesheet::TimesheetLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_status, color_for_surplus};
use crate::utils::date::reference_date;
use crate::utils::formatting::{ms2hours, ms2readable, weekday_label};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Week { staff, date } = cmd {
        let pool = ctx.open_pool()?;
        let (_, staff) = ctx.staff(&pool, staff)?;
        let now = ctx.now();

        let window = week_window_for_date(reference_date(date.as_ref(), now)?);
        let view = TimesheetLogic::week_view(
            &pool,
            &staff,
            window,
            now,
            ctx.cfg.weekly_target_ms()?,
            ctx.cfg.period_match,
        )?;
        let summary = &view.summary;

        header(format!("Week {} - {}", window, staff.label()));

        let mut table = Table::new(
            vec![
                Column::left("DAY"),
                Column::left("DATE"),
                Column::right("ENTRIES"),
                Column::right("WORKED"),
            ],
            ctx.cfg.separator(),
        );

        for (day, worked) in &summary.per_day {
            let count = summary
                .lines
                .iter()
                .filter(|l| l.entry.clock_in.date_naive() == *day)
                .count();
            table.add_row(vec![
                weekday_label(day, &ctx.cfg.show_weekday),
                day.to_string(),
                count.to_string(),
                ms2readable(*worked, false, true),
            ]);
        }
        print!("{}", table.render());

        println!();
        println!(
            "Total:    {} ({} h)",
            ms2readable(summary.total_ms, false, false),
            ms2hours(summary.total_ms)
        );
        println!("Expected: {}", ms2readable(summary.expected_ms, false, false));
        println!(
            "Surplus:  {}{}{}",
            color_for_surplus(summary.surplus_ms),
            ms2readable(summary.surplus_ms, true, false),
            RESET
        );
        println!(
            "Status:   {}{}{}",
            color_for_status(view.status),
            view.status,
            RESET
        );

        if let Some(ts) = &view.timesheet {
            if let Some(by) = &ts.approver {
                println!("Decided by {}", by);
            }
            if let Some(reason) = &ts.rejection_reason {
                println!("Reason:   {}", reason);
            }
            if let Some(notes) = &ts.notes {
                println!("Notes:    {}", notes);
            }
        }

        if summary.has_open_entries() {
            info(format!(
                "A shift is still open: counted up to {}.",
                now.format("%Y-%m-%d %H:%M")
            ));
        }
    }

    Ok(())
}
