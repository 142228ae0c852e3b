use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{ct, init_db_with_data, init_with_staff, run_ok, setup_test_db, temp_out};

#[test]
fn test_init_applies_migrations_once() {
    let db_path = setup_test_db("init_migrations");

    ct().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Migration applied"))
        .stdout(contains("Active tenant: default"));

    ct().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Migration applied").not());

    ct().args(["--db", &db_path, "log", "--print", "--op", "migration_applied"])
        .assert()
        .success()
        .stdout(contains("20240105_0001_create_tenants_staff"))
        .stdout(contains("20240305_0005_add_staff_role"));
}

#[test]
fn test_duplicate_staff_code_rejected() {
    let db_path = setup_test_db("duplicate_staff");
    init_with_staff(&db_path);

    ct().args(["--db", &db_path, "staff", "--add", "rn1", "--name", "Someone Else"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    ct().args(["--db", &db_path, "staff", "--list"])
        .assert()
        .success()
        .stdout(contains("Jane Doe"))
        .stdout(contains("Someone Else").not());
}

#[test]
fn test_tenants_are_isolated() {
    let db_path = setup_test_db("tenant_isolation");
    init_with_staff(&db_path);

    run_ok(&db_path, &["tenant", "--add", "north", "--name", "North Clinic"]);

    ct().args(["--db", &db_path, "tenant", "--add", "north"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    // the same staff code may exist in another tenant
    run_ok(
        &db_path,
        &["--tenant", "north", "staff", "--add", "rn1", "--name", "John Roe"],
    );

    ct().args(["--db", &db_path, "--tenant", "north", "staff", "--list"])
        .assert()
        .success()
        .stdout(contains("John Roe"))
        .stdout(contains("Jane Doe").not());

    ct().args(["--db", &db_path, "--tenant", "south", "staff", "--list"])
        .assert()
        .failure()
        .stderr(contains("Unknown tenant 'south'"));

    ct().args(["--db", &db_path, "tenant", "--list"])
        .assert()
        .success()
        .stdout(contains("North Clinic"));
}

#[test]
fn test_audit_log_records_clock_events() {
    let db_path = setup_test_db("audit_log");
    init_db_with_data(&db_path);

    ct().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("clock_in"))
        .stdout(contains("break_start"))
        .stdout(contains("default/rn1"));
}

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("db_check_info");
    init_db_with_data(&db_path);

    ct().args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Time entries:"))
        .stdout(contains("Open shifts:"));

    ct().args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("0 applied"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup");
    init_db_with_data(&db_path);

    let plain = temp_out("backup_plain", "sqlite");
    ct().args(["--db", &db_path, "backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(fs::metadata(&plain).unwrap().len() > 0);

    let packed = temp_out("backup_packed", "sqlite");
    let archive = if cfg!(target_os = "windows") {
        packed.replace(".sqlite", ".zip")
    } else {
        format!("{packed}.tar.gz")
    };
    fs::remove_file(&archive).ok();

    ct().args(["--db", &db_path, "backup", "--file", &packed, "--compress"])
        .assert()
        .success();

    assert!(fs::metadata(&archive).is_ok());
    assert!(fs::metadata(&packed).is_err());
}

#[test]
fn test_config_print_shows_defaults() {
    let db_path = setup_test_db("config_print");
    init_with_staff(&db_path);

    ct().args(["--db", &db_path, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("weekly_target"))
        .stdout(contains("period_match"));
}

#[test]
fn test_audit_log_follows_fixed_now() {
    let db_path = setup_test_db("audit_fixed_now");
    init_with_staff(&db_path);

    run_ok(&db_path, &["--now", "2024-01-03T09:15:00Z", "in", "rn1"]);

    ct().args(["--db", &db_path, "log", "--print", "--op", "clock_in"])
        .assert()
        .success()
        .stdout(contains("2024-01-03T09:15:00+00:00"));
}
