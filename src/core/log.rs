use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const OP_TARGET_WIDTH: usize = 60;

static ANSI_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

fn strip_ansi(s: &str) -> String {
    match ANSI_RE.as_ref() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock_in" | "break_end" => Colour::Green,
        "clock_out" | "break_start" => Colour::Cyan,
        "submit" => Colour::Yellow,
        "approve" => Colour::Green,
        "reject" | "staff_deactivate" => Colour::Red,
        "incident_add" | "incident_update" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Print the audit trail, optionally filtered on the operation name.
    pub fn print_log(pool: &DbPool, operation: Option<&str>) -> AppResult<()> {
        let rows: Vec<_> = load_log(&pool.conn)?
            .into_iter()
            .filter(|r| operation.is_none_or(|op| r.operation == op))
            .collect();

        if rows.is_empty() {
            println!("No log entries.");
            return Ok(());
        }

        let entries: Vec<(i64, String, String, String, String)> = rows
            .into_iter()
            .map(|r| {
                let date = chrono::DateTime::parse_from_rfc3339(&r.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(r.date);
                let op_target = if r.target.is_empty() {
                    r.operation.clone()
                } else {
                    format!("{} ({})", r.operation, r.target)
                };
                (r.id, date, r.operation, op_target, r.message)
            })
            .collect();

        let op_w = entries
            .iter()
            .map(|e| e.3.chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_TARGET_WIDTH);
        let id_w = entries.iter().map(|e| e.0.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.1.len()).max().unwrap_or(10);

        println!("📜 Audit log:\n");

        for (id, date, operation, op_target, message) in entries {
            let color = color_for_operation(&operation);

            let visible = if op_target.chars().count() > OP_TARGET_WIDTH {
                let mut s: String = op_target.chars().take(OP_TARGET_WIDTH - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target
            };

            // only the operation word is coloured
            let painted = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&painted).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                painted,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
