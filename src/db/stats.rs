use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

const COUNTED_TABLES: &[(&str, &str)] = &[
    ("tenants", "Tenants"),
    ("staff", "Staff members"),
    ("time_entries", "Time entries"),
    ("breaks", "Breaks"),
    ("timesheets", "Timesheets"),
    ("incidents", "Incidents"),
];

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    for (table, label) in COUNTED_TABLES {
        let count: i64 =
            pool.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(clock_in), MAX(clock_in) FROM time_entries",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let placeholder = || format!("{GREY}--{RESET}");

    println!("{}• Clock-in range:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(placeholder));
    println!("    to:   {}", last.unwrap_or_else(placeholder));

    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM time_entries WHERE clock_out IS NULL",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Open shifts:{} {}", CYAN, RESET, open);

    println!();
    Ok(())
}
