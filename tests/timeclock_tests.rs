use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_shift, ct, init_with_staff, run_ok, setup_test_db};

#[test]
fn test_shift_with_break_reports_worked_time() {
    let db_path = setup_test_db("shift_with_break");
    init_with_staff(&db_path);

    ct().args(["--db", &db_path, "in", "rn1", "--at", "2024-01-03T09:00:00Z"])
        .assert()
        .success()
        .stdout(contains("clocked in at 2024-01-03 09:00"));

    run_ok(&db_path, &["break", "rn1", "--start", "--at", "2024-01-03T12:00:00Z"]);
    run_ok(&db_path, &["break", "rn1", "--end", "--at", "2024-01-03T12:30:00Z"]);

    ct().args(["--db", &db_path, "out", "rn1", "--at", "2024-01-03T17:00:00Z"])
        .assert()
        .success()
        .stdout(contains("worked 07h 30m"));
}

#[test]
fn test_double_clock_in_rejected() {
    let db_path = setup_test_db("double_clock_in");
    init_with_staff(&db_path);

    run_ok(&db_path, &["in", "rn1", "--at", "2024-01-03T09:00:00Z"]);

    ct().args(["--db", &db_path, "in", "rn1", "--at", "2024-01-03T10:00:00Z"])
        .assert()
        .failure()
        .stderr(contains("already clocked in"));
}

#[test]
fn test_clock_out_without_entry_fails() {
    let db_path = setup_test_db("out_without_in");
    init_with_staff(&db_path);

    ct().args(["--db", &db_path, "out", "rn1"])
        .assert()
        .failure()
        .stderr(contains("is not clocked in"));
}

#[test]
fn test_clock_out_before_clock_in_is_invalid() {
    let db_path = setup_test_db("out_before_in");
    init_with_staff(&db_path);

    run_ok(&db_path, &["in", "rn1", "--at", "2024-01-03T09:00:00Z"]);

    ct().args(["--db", &db_path, "out", "rn1", "--at", "2024-01-03T08:00:00Z"])
        .assert()
        .failure()
        .stderr(contains("Invalid interval"));
}

#[test]
fn test_break_rules() {
    let db_path = setup_test_db("break_rules");
    init_with_staff(&db_path);

    // no open entry
    ct().args(["--db", &db_path, "break", "rn1", "--start"])
        .assert()
        .failure()
        .stderr(contains("is not clocked in"));

    run_ok(&db_path, &["in", "rn1", "--at", "2024-01-03T09:00:00Z"]);

    ct().args(["--db", &db_path, "break", "rn1", "--end", "--at", "2024-01-03T10:00:00Z"])
        .assert()
        .failure()
        .stderr(contains("no break in progress"));

    ct().args(["--db", &db_path, "break", "rn1", "--start", "--at", "2024-01-03T08:00:00Z"])
        .assert()
        .failure()
        .stderr(contains("Invalid interval"));

    run_ok(&db_path, &["break", "rn1", "--start", "--at", "2024-01-03T12:00:00Z"]);

    ct().args(["--db", &db_path, "break", "rn1", "--start", "--at", "2024-01-03T12:10:00Z"])
        .assert()
        .failure()
        .stderr(contains("already on a break"));
}

#[test]
fn test_break_needs_start_or_end() {
    let db_path = setup_test_db("break_flag_required");
    init_with_staff(&db_path);

    ct().args(["--db", &db_path, "break", "rn1"]).assert().failure();
    ct().args(["--db", &db_path, "break", "rn1", "--start", "--end"])
        .assert()
        .failure();
}

#[test]
fn test_clock_out_closes_open_break() {
    let db_path = setup_test_db("out_closes_break");
    init_with_staff(&db_path);

    run_ok(&db_path, &["in", "rn1", "--at", "2024-01-03T09:00:00Z"]);
    run_ok(&db_path, &["break", "rn1", "--start", "--at", "2024-01-03T16:00:00Z"]);

    ct().args(["--db", &db_path, "out", "rn1", "--at", "2024-01-03T17:00:00Z"])
        .assert()
        .success()
        .stdout(contains("worked 07h 00m"));

    ct().args(["--db", &db_path, "entries", "rn1", "--period", "2024-01-03"])
        .assert()
        .success()
        .stdout(contains("break 16:00"))
        .stdout(contains("--:--").not());
}

#[test]
fn test_unknown_and_inactive_staff() {
    let db_path = setup_test_db("inactive_staff");
    init_with_staff(&db_path);

    ct().args(["--db", &db_path, "in", "ghost"])
        .assert()
        .failure()
        .stderr(contains("Unknown staff member 'ghost'"));

    run_ok(&db_path, &["staff", "--deactivate", "rn1"]);

    ct().args(["--db", &db_path, "in", "rn1", "--at", "2024-01-03T09:00:00Z"])
        .assert()
        .failure()
        .stderr(contains("inactive"));
}

#[test]
fn test_now_flag_drives_default_instants() {
    let db_path = setup_test_db("now_flag");
    init_with_staff(&db_path);

    run_ok(&db_path, &["--now", "2024-01-03T08:00:00Z", "in", "rn1"]);

    ct().args(["--db", &db_path, "--now", "2024-01-03T10:30:00Z", "out", "rn1"])
        .assert()
        .success()
        .stdout(contains("2024-01-03 10:30"))
        .stdout(contains("worked 02h 30m"));
}

#[test]
fn test_entries_lists_period() {
    let db_path = setup_test_db("entries_period");
    init_with_staff(&db_path);
    add_shift(&db_path, "rn1", "2024-01-03");
    add_shift(&db_path, "rn1", "2024-02-05");

    ct().args(["--db", &db_path, "entries", "rn1", "--period", "2024-01"])
        .assert()
        .success()
        .stdout(contains("2024-01-03"))
        .stdout(contains("2024-02-05").not())
        .stdout(contains("Total worked: 07h 30m"));

    ct().args(["--db", &db_path, "entries", "rn1", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("2024-02-05"))
        .stdout(contains("Total worked: 15h 00m"));

    ct().args(["--db", &db_path, "entries", "rn1", "--period", "2024-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid range"));
}

#[test]
fn test_open_shift_counts_up_to_now() {
    let db_path = setup_test_db("open_shift_now");
    init_with_staff(&db_path);

    run_ok(&db_path, &["in", "rn1", "--at", "2024-01-03T09:00:00Z"]);

    ct().args([
        "--db",
        &db_path,
        "--now",
        "2024-01-03T12:00:00Z",
        "entries",
        "rn1",
    ])
    .assert()
    .success()
    .stdout(contains("--:--"))
    .stdout(contains("Total worked: 03h 00m"));
}
