use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ct, init_with_staff, run_ok, setup_test_db};

#[test]
fn test_phi_incident_has_notification_deadline() {
    let db_path = setup_test_db("incident_phi_deadline");
    init_with_staff(&db_path);

    ct().args([
        "--db",
        &db_path,
        "incident",
        "--add",
        "Fax sent to wrong number",
        "--severity",
        "high",
        "--phi",
        "--affected",
        "3",
        "--reporter",
        "rn1",
        "--at",
        "2024-01-10T08:00:00Z",
    ])
    .assert()
    .success()
    .stdout(contains("Incident #1 recorded [HIGH]"))
    .stdout(contains("notification due by 2024-03-10 08:00"));
}

#[test]
fn test_incident_list_flags_overdue() {
    let db_path = setup_test_db("incident_overdue");
    init_with_staff(&db_path);

    run_ok(
        &db_path,
        &[
            "incident",
            "--add",
            "Laptop stolen",
            "--phi",
            "--description",
            "Unencrypted laptop taken from the nurses' station overnight.",
            "--at",
            "2024-01-10T08:00:00Z",
        ],
    );
    run_ok(
        &db_path,
        &[
            "incident",
            "--add",
            "Badge reader down",
            "--severity",
            "low",
            "--at",
            "2024-01-11T08:00:00Z",
        ],
    );

    ct().args(["--db", &db_path, "--now", "2024-04-01T00:00:00Z", "incident", "--list"])
        .assert()
        .success()
        .stdout(contains("2024-03-10 OVERDUE"))
        .stdout(contains("Badge reader down"))
        .stdout(contains("nurses' station"))
        .stdout(contains("1 PHI incident(s) past the notification deadline"));
}

#[test]
fn test_incident_resolution_is_final() {
    let db_path = setup_test_db("incident_resolved_final");
    init_with_staff(&db_path);

    run_ok(&db_path, &["incident", "--add", "Misfiled chart"]);

    ct().args(["--db", &db_path, "incident", "--update", "1", "--status", "investigating"])
        .assert()
        .success()
        .stdout(contains("INVESTIGATING"));

    ct().args(["--db", &db_path, "incident", "--update", "1", "--status", "resolved"])
        .assert()
        .success()
        .stdout(contains("RESOLVED"));

    ct().args(["--db", &db_path, "incident", "--update", "1", "--status", "open"])
        .assert()
        .failure()
        .stderr(contains("Resolved incidents are final"));

    ct().args(["--db", &db_path, "incident", "--list", "--open"])
        .assert()
        .success()
        .stdout(contains("Misfiled chart").not());
}

#[test]
fn test_incident_input_errors() {
    let db_path = setup_test_db("incident_errors");
    init_with_staff(&db_path);

    ct().args(["--db", &db_path, "incident", "--add", "x", "--severity", "urgent"])
        .assert()
        .failure()
        .stderr(contains("Invalid severity"));

    ct().args(["--db", &db_path, "incident", "--add", "x", "--reporter", "ghost"])
        .assert()
        .failure()
        .stderr(contains("Unknown staff member"));

    ct().args(["--db", &db_path, "incident", "--update", "42", "--status", "resolved"])
        .assert()
        .failure()
        .stderr(contains("Incident #42 not found"));
}
