#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ct() -> Command {
    cargo_bin_cmd!("caretime")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_caretime.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `caretime --db <db> <args...>`, must succeed.
pub fn run_ok(db_path: &str, args: &[&str]) {
    ct().args(["--db", db_path]).args(args).assert().success();
}

/// Initialize DB (default tenant) and register one nurse, `rn1`.
pub fn init_with_staff(db_path: &str) {
    ct().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    run_ok(
        db_path,
        &["staff", "--add", "rn1", "--name", "Jane Doe", "--role", "RN"],
    );
}

/// One 09:00-17:00 shift with a 12:00-12:30 break on `day` (YYYY-MM-DD).
pub fn add_shift(db_path: &str, staff: &str, day: &str) {
    run_ok(db_path, &["in", staff, "--at", &format!("{day}T09:00:00Z")]);
    run_ok(db_path, &["break", staff, "--start", "--at", &format!("{day}T12:00:00Z")]);
    run_ok(db_path, &["break", staff, "--end", "--at", &format!("{day}T12:30:00Z")]);
    run_ok(db_path, &["out", staff, "--at", &format!("{day}T17:00:00Z")]);
}

/// Two full shifts in the week of 2024-01-01 and one in the following week.
pub fn init_db_with_data(db_path: &str) {
    init_with_staff(db_path);
    add_shift(db_path, "rn1", "2024-01-03");
    add_shift(db_path, "rn1", "2024-01-04");
    add_shift(db_path, "rn1", "2024-01-09");
}
