use caretime::core::calculator::{PeriodMatch, WeekWindow, week_window};
use caretime::core::incident::{IncidentLogic, NewIncident};
use caretime::core::tenant::{StaffLogic, TenantLogic};
use caretime::core::timeclock::ClockLogic;
use caretime::core::timesheet::{TimesheetLogic, WeekView};
use caretime::db::initialize::init_db;
use caretime::db::pool::DbPool;
use caretime::errors::{AppError, AppResult};
use caretime::models::incident::{IncidentStatus, Severity};
use caretime::models::tenant::{Staff, Tenant};
use caretime::models::time_entry::TimeEntry;
use caretime::models::timesheet::TimesheetStatus;
use chrono::{DateTime, Duration, Utc};

const SETUP: &str = "2023-12-28T07:00:00Z";

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

/// Clock events are recorded at the instant they claim.
fn clock_in(pool: &mut DbPool, tenant: &Tenant, staff: &Staff, at: &str) -> AppResult<TimeEntry> {
    ClockLogic::clock_in(pool, tenant, staff, ts(at), ts(at))
}

fn clock_out(pool: &mut DbPool, tenant: &Tenant, staff: &Staff, at: &str) -> AppResult<TimeEntry> {
    ClockLogic::clock_out(pool, tenant, staff, ts(at), ts(at))
}

fn register(pool: &mut DbPool, tenant: &Tenant, code: &str, name: &str) -> Staff {
    StaffLogic::register(pool, tenant, code, name, None, ts(SETUP)).unwrap()
}

fn view(
    pool: &DbPool,
    staff: &Staff,
    window: WeekWindow,
    now: DateTime<Utc>,
    mode: PeriodMatch,
) -> WeekView {
    TimesheetLogic::week_view(pool, staff, window, now, 0, mode).unwrap()
}

fn fresh_pool() -> DbPool {
    let pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    pool
}

#[test]
fn migrations_are_idempotent() {
    let pool = fresh_pool();
    init_db(&pool.conn).unwrap();

    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(applied, 5);
}

#[test]
fn approved_week_freezes_its_entries() {
    let mut pool = fresh_pool();
    let tenant = TenantLogic::ensure(&mut pool, "default", ts(SETUP)).unwrap();
    let staff = StaffLogic::register(&mut pool, &tenant, "ma1", "Sam Lee", Some("MA"), ts(SETUP))
        .unwrap();

    clock_in(&mut pool, &tenant, &staff, "2024-01-02T08:00:00Z").unwrap();
    clock_out(&mut pool, &tenant, &staff, "2024-01-02T16:00:00Z").unwrap();

    let window = week_window(ts("2024-01-02T08:00:00Z"));
    let now = ts("2024-01-08T09:00:00Z");

    let sheet = TimesheetLogic::submit(&mut pool, &tenant, &staff, window, now, None).unwrap();
    assert_eq!(sheet.status, TimesheetStatus::Submitted);
    assert_eq!(sheet.total_hours(), 8.0);

    let sheet = TimesheetLogic::approve(&mut pool, &tenant, &staff, window, "lead", now).unwrap();
    assert_eq!(sheet.status, TimesheetStatus::Approved);

    let err = clock_in(&mut pool, &tenant, &staff, "2024-01-03T08:00:00Z").unwrap_err();
    assert!(matches!(err, AppError::PeriodLocked(_)));

    // the following week is unaffected
    clock_in(&mut pool, &tenant, &staff, "2024-01-09T08:00:00Z").unwrap();

    let week = view(&pool, &staff, window, now, PeriodMatch::Exact);
    assert_eq!(week.status, TimesheetStatus::Approved);
    assert_eq!(week.summary.total_ms, 8 * 3_600_000);
}

#[test]
fn reject_requires_a_submission_and_a_reason() {
    let mut pool = fresh_pool();
    let tenant = TenantLogic::ensure(&mut pool, "default", ts(SETUP)).unwrap();
    let staff = register(&mut pool, &tenant, "fd1", "Ana Ruiz");
    let window = week_window(ts("2024-02-07T10:00:00Z"));
    let now = ts("2024-02-12T10:00:00Z");

    let err = TimesheetLogic::reject(&mut pool, &tenant, &staff, window, "lead", "late", now)
        .unwrap_err();
    assert!(matches!(err, AppError::NoTimesheet(_)));

    TimesheetLogic::submit(&mut pool, &tenant, &staff, window, now, None).unwrap();

    let err =
        TimesheetLogic::reject(&mut pool, &tenant, &staff, window, "lead", "   ", now).unwrap_err();
    assert!(matches!(err, AppError::MissingReason));

    let sheet =
        TimesheetLogic::reject(&mut pool, &tenant, &staff, window, "lead", "missing Friday", now)
            .unwrap();
    assert_eq!(sheet.status, TimesheetStatus::Rejected);
    assert_eq!(sheet.rejection_reason.as_deref(), Some("missing Friday"));
}

#[test]
fn phi_incident_lifecycle() {
    let mut pool = fresh_pool();
    let tenant = TenantLogic::ensure(&mut pool, "default", ts(SETUP)).unwrap();
    let occurred = ts("2024-03-01T12:00:00Z");

    let incident = IncidentLogic::report(
        &mut pool,
        &tenant,
        NewIncident {
            title: "Email with lab results sent to wrong patient",
            description: "",
            severity: Severity::High,
            phi_involved: true,
            affected_records: 1,
            reporter: None,
            occurred_at: occurred,
        },
        ts("2024-03-02T09:00:00Z"),
    )
    .unwrap();

    assert_eq!(incident.status, IncidentStatus::Open);
    assert_eq!(incident.notification_deadline(), Some(occurred + Duration::days(60)));
    assert!(incident.is_overdue(occurred + Duration::days(61)));

    let resolved_at = ts("2024-03-05T09:00:00Z");
    let closed = IncidentLogic::set_status(
        &mut pool,
        &tenant,
        incident.id,
        IncidentStatus::Resolved,
        resolved_at,
    )
    .unwrap();
    assert_eq!(closed.resolved_at, Some(resolved_at));
    assert!(!closed.is_overdue(occurred + Duration::days(61)));

    let reopen = IncidentStatus::Open;
    let err = IncidentLogic::set_status(&mut pool, &tenant, incident.id, reopen, resolved_at)
        .unwrap_err();
    assert!(matches!(err, AppError::IncidentClosed(_)));
}

#[test]
fn approval_waits_for_open_shifts() {
    let mut pool = fresh_pool();
    let tenant = TenantLogic::ensure(&mut pool, "default", ts(SETUP)).unwrap();
    let staff = register(&mut pool, &tenant, "rn2", "Kim Park");
    let window = week_window(ts("2024-01-03T09:00:00Z"));

    clock_in(&mut pool, &tenant, &staff, "2024-01-03T09:00:00Z").unwrap();
    TimesheetLogic::submit(&mut pool, &tenant, &staff, window, ts("2024-01-03T11:00:00Z"), None)
        .unwrap();

    let noon = ts("2024-01-03T12:00:00Z");
    let err =
        TimesheetLogic::approve(&mut pool, &tenant, &staff, window, "lead", noon).unwrap_err();
    assert!(matches!(err, AppError::OpenShift(..)));

    // still SUBMITTED, and the shift can be closed
    let week = view(&pool, &staff, window, noon, PeriodMatch::Exact);
    assert_eq!(week.status, TimesheetStatus::Submitted);
    clock_out(&mut pool, &tenant, &staff, "2024-01-03T17:00:00Z").unwrap();
}

#[test]
fn standalone_status_follows_period_match() {
    let mut pool = fresh_pool();
    let tenant = TenantLogic::ensure(&mut pool, "default", ts(SETUP)).unwrap();
    let staff = register(&mut pool, &tenant, "rn3", "Lee Chan");
    let window = week_window(ts("2024-01-03T09:00:00Z"));
    let now = ts("2024-01-08T09:00:00Z");

    TimesheetLogic::submit(&mut pool, &tenant, &staff, window, now, None).unwrap();

    // a period stored without the trailing millisecond
    pool.conn
        .execute(
            "UPDATE timesheets SET period_end = '2024-01-07T23:59:59.000Z' WHERE staff_id = ?1",
            [staff.id],
        )
        .unwrap();

    let exact = view(&pool, &staff, window, now, PeriodMatch::Exact);
    assert_eq!(exact.status, TimesheetStatus::NotSubmitted);
    assert!(exact.timesheet.is_none());

    let by_date = view(&pool, &staff, window, now, PeriodMatch::CalendarDate);
    assert_eq!(by_date.status, TimesheetStatus::Submitted);
    assert!(by_date.timesheet.is_some());
}

#[test]
fn audit_rows_use_the_supplied_instant() {
    let mut pool = fresh_pool();
    let tenant = TenantLogic::ensure(&mut pool, "default", ts(SETUP)).unwrap();
    assert_eq!(&tenant.created_at[..10], "2023-12-28");

    let staff = register(&mut pool, &tenant, "ma2", "Joe Bell");
    ClockLogic::clock_in(
        &mut pool,
        &tenant,
        &staff,
        ts("2024-01-02T08:00:00Z"),
        ts("2024-01-02T08:05:00Z"),
    )
    .unwrap();

    let (date, created): (String, String) = pool
        .conn
        .query_row(
            "SELECT l.date, e.created_at FROM log l, time_entries e
             WHERE l.operation = 'clock_in' AND e.staff_id = ?1",
            [staff.id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(date, "2024-01-02T08:05:00.000Z");
    assert_eq!(created, "2024-01-02T08:05:00.000Z");
}

#[test]
fn incident_input_is_validated() {
    let mut pool = fresh_pool();
    let tenant = TenantLogic::ensure(&mut pool, "default", ts(SETUP)).unwrap();
    let input = |title, affected_records| NewIncident {
        title,
        description: "",
        severity: Severity::Low,
        phi_involved: false,
        affected_records,
        reporter: None,
        occurred_at: ts("2024-03-01T12:00:00Z"),
    };

    let err = IncidentLogic::report(&mut pool, &tenant, input("  ", 0), ts(SETUP)).unwrap_err();
    assert!(matches!(err, AppError::InvalidIncident(_)));

    let err =
        IncidentLogic::report(&mut pool, &tenant, input("Lost badge", -2), ts(SETUP)).unwrap_err();
    assert!(matches!(err, AppError::InvalidIncident(_)));
}
