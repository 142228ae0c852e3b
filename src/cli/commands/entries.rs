use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::calculator::week_window;
use crate::core::logic::Core;
use crate::db::queries::load_staff_entries;
use crate::errors::AppResult;
use crate::export::range::range_bounds;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{ms2readable, weekday_label};
use crate::utils::table::{Column, Table};
use crate::utils::time::hhmm;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Entries { staff, period } = cmd {
        let pool = ctx.open_pool()?;
        let (_, staff) = ctx.staff(&pool, staff)?;
        let now = ctx.now();

        let (bounds, label) = match period {
            Some(p) => (range_bounds(Some(p))?, p.clone()),
            None => {
                let w = week_window(now);
                (Some((w.start, w.end)), format!("week {}", w))
            }
        };

        let entries = load_staff_entries(&pool.conn, staff.id, bounds)?;
        header(format!("Entries of {} ({})", staff.label(), label));

        if entries.is_empty() {
            info("No entries in this period.");
            return Ok(());
        }

        let mut table = Table::new(
            vec![
                Column::right("ID"),
                Column::left("DATE"),
                Column::left("IN"),
                Column::left("OUT"),
                Column::right("BREAKS"),
                Column::right("BREAK"),
                Column::right("WORKED"),
            ],
            ctx.cfg.separator(),
        );

        let mut total = 0;
        for entry in &entries {
            let line = Core::entry_line(entry, now);
            total += line.working_ms;

            let day = entry.clock_in.date_naive();
            let wd = weekday_label(&day, &ctx.cfg.show_weekday);
            let date = if wd.is_empty() {
                day.to_string()
            } else {
                format!("{} {}", wd, day)
            };

            table.add_row(vec![
                entry.id.to_string(),
                date,
                hhmm(&entry.clock_in),
                match &entry.clock_out {
                    Some(out) => hhmm(out),
                    None => "--:--".to_string(),
                },
                entry.breaks.len().to_string(),
                ms2readable(line.break_ms, false, true),
                ms2readable(line.working_ms, false, true),
            ]);

            for b in &entry.breaks {
                let end = b.end.as_ref().map(hhmm).unwrap_or_else(|| "--:--".into());
                table.add_row(vec![
                    String::new(),
                    String::new(),
                    format!("  break {}", hhmm(&b.start)),
                    end,
                    String::new(),
                    String::new(),
                    String::new(),
                ]);
            }
        }

        print!("{}", table.render());
        println!("\nTotal worked: {}", ms2readable(total, false, false));

        if entries.iter().any(|e| e.is_open()) {
            info(format!(
                "Open shifts are counted up to {}.",
                now.format("%Y-%m-%d %H:%M")
            ));
        }
    }

    Ok(())
}
