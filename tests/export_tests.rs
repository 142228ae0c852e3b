mod common;
use common::{ct, init_db_with_data, run_ok, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_entries_csv_all() {
    let db_path = setup_test_db("export_entries_csv_all");
    init_db_with_data(&db_path);

    let out = temp_out("export_entries_csv_all", "csv");

    ct().args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,staff,clock_in,clock_out,breaks,break_minutes,worked_minutes,worked")
    );
    assert!(content.contains("rn1,2024-01-03 09:00:00,2024-01-03 17:00:00,1,30,450,07h 30m"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_export_entries_json_range() {
    let db_path = setup_test_db("export_entries_json_range");
    init_db_with_data(&db_path);

    let out = temp_out("export_entries_json_range", "json");

    ct().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--range",
        "2024-01-01:2024-01-07",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("json array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["staff"], "rn1");
    assert_eq!(rows[0]["worked_minutes"], 450);
    assert!(!content.contains("2024-01-09"));
}

#[test]
fn test_export_timesheets_csv() {
    let db_path = setup_test_db("export_timesheets_csv");
    init_db_with_data(&db_path);

    run_ok(&db_path, &["--now", "2024-01-08T08:00:00Z", "submit", "rn1", "--date", "2024-01-03"]);
    run_ok(&db_path, &["approve", "rn1", "--date", "2024-01-03", "--by", "boss"]);

    let out = temp_out("export_timesheets_csv", "csv");

    ct().args([
        "--db", &db_path, "export", "--data", "timesheets", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("id,staff,period_start,period_end,hours,status"));
    assert!(content.contains("rn1,2024-01-01,2024-01-07,15.00,APPROVED,boss"));
}

#[test]
fn test_export_xlsx_and_pdf_created() {
    let db_path = setup_test_db("export_xlsx_pdf");
    init_db_with_data(&db_path);

    let xlsx = temp_out("export_xlsx_pdf", "xlsx");
    ct().args(["--db", &db_path, "export", "--format", "xlsx", "--file", &xlsx])
        .assert()
        .success();
    let bytes = fs::read(&xlsx).expect("read xlsx");
    assert!(bytes.starts_with(b"PK"));

    let pdf = temp_out("export_xlsx_pdf", "pdf");
    ct().args([
        "--db", &db_path, "export", "--format", "pdf", "--file", &pdf, "--range", "2024-01",
    ])
    .assert()
    .success();
    let bytes = fs::read(&pdf).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty_range");
    init_db_with_data(&db_path);

    let out = temp_out("export_empty_range", "csv");

    ct().args([
        "--db", &db_path, "export", "--file", &out, "--range", "2020",
    ])
    .assert()
    .success()
    .stdout(contains("No entries found"));

    assert!(fs::metadata(&out).is_err());
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative_path");
    init_db_with_data(&db_path);

    ct().args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_force_overwrites() {
    let db_path = setup_test_db("export_force");
    init_db_with_data(&db_path);

    let out = temp_out("export_force", "csv");
    fs::write(&out, "old content").expect("seed file");

    ct().args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(!content.contains("old content"));
    assert!(content.contains("rn1"));
}

#[test]
fn test_export_existing_file_declined() {
    let db_path = setup_test_db("export_declined");
    init_db_with_data(&db_path);

    let out = temp_out("export_declined", "csv");
    fs::write(&out, "old content").expect("seed file");

    ct().args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "old content");
}
