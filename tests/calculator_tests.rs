use caretime::core::calculator::{
    PeriodMatch, WeekWindow, reconcile_status, week_window, week_window_for_date, working_ms,
    working_ms_at,
};
use caretime::core::clock::FixedClock;
use caretime::core::logic::Core;
use caretime::models::time_entry::TimeEntry;
use caretime::models::timesheet::{Timesheet, TimesheetStatus};
use caretime::utils::time::{parse_duration_to_minutes, parse_timestamp, to_db};
use chrono::{Datelike, Duration, NaiveDate, Timelike, Weekday};

fn ts(s: &str) -> chrono::DateTime<chrono::Utc> {
    parse_timestamp(s).expect("valid timestamp")
}

#[test]
fn closed_entry_without_breaks_is_the_span() {
    let e = TimeEntry::parse("2024-01-03T09:00:00Z", Some("2024-01-03T17:00:00Z")).unwrap();
    assert_eq!(working_ms(&e, ts("2030-01-01T00:00:00Z")), 8 * 3_600_000);
}

#[test]
fn shift_with_half_hour_break() {
    let e = TimeEntry::parse("2024-01-03T09:00:00Z", Some("2024-01-03T17:00:00Z"))
        .unwrap()
        .with_break_str("2024-01-03T12:00:00Z", Some("2024-01-03T12:30:00Z"))
        .unwrap();
    assert_eq!(working_ms(&e, ts("2024-01-03T18:00:00Z")), 27_000_000);
}

#[test]
fn open_entry_counts_up_to_now() {
    let e = TimeEntry::new(ts("2024-01-03T09:00:00Z"));
    let clock = FixedClock(ts("2024-01-03T11:15:00Z"));
    assert_eq!(working_ms_at(&e, &clock), 2 * 3_600_000 + 15 * 60_000);
}

#[test]
fn open_break_counts_up_to_now() {
    let e = TimeEntry::new(ts("2024-01-03T09:00:00Z"))
        .with_break(ts("2024-01-03T12:00:00Z"), None);
    // span 3h20m, break so far 20m
    assert_eq!(working_ms(&e, ts("2024-01-03T12:20:00Z")), 3 * 3_600_000);
}

#[test]
fn inverted_intervals_clamp_to_zero() {
    let e = TimeEntry::parse("2024-01-03T17:00:00Z", Some("2024-01-03T09:00:00Z")).unwrap();
    assert_eq!(working_ms(&e, ts("2024-01-04T00:00:00Z")), 0);

    let e = TimeEntry::parse("2024-01-03T09:00:00Z", Some("2024-01-03T10:00:00Z"))
        .unwrap()
        .with_break_str("2024-01-03T11:00:00Z", Some("2024-01-03T10:00:00Z"))
        .unwrap();
    assert_eq!(working_ms(&e, ts("2024-01-04T00:00:00Z")), 3_600_000);
}

#[test]
fn breaks_are_not_clipped_to_the_entry() {
    // 1h shift, two overlapping 45m breaks: 1h - 90m clamps to 0
    let e = TimeEntry::parse("2024-01-03T09:00:00Z", Some("2024-01-03T10:00:00Z"))
        .unwrap()
        .with_break_str("2024-01-03T09:00:00Z", Some("2024-01-03T09:45:00Z"))
        .unwrap()
        .with_break_str("2024-01-03T09:10:00Z", Some("2024-01-03T09:55:00Z"))
        .unwrap();
    assert_eq!(working_ms(&e, ts("2024-01-04T00:00:00Z")), 0);

    // a break outside the span still counts
    let e = TimeEntry::parse("2024-01-03T09:00:00Z", Some("2024-01-03T17:00:00Z"))
        .unwrap()
        .with_break_str("2024-01-03T18:00:00Z", Some("2024-01-03T19:00:00Z"))
        .unwrap();
    assert_eq!(working_ms(&e, ts("2024-01-04T00:00:00Z")), 7 * 3_600_000);
}

#[test]
fn wednesday_maps_to_monday_sunday_window() {
    let w = week_window_for_date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    assert_eq!(to_db(&w.start), "2024-01-01T00:00:00.000Z");
    assert_eq!(to_db(&w.end), "2024-01-07T23:59:59.999Z");
}

#[test]
fn sunday_and_monday_edges() {
    let sunday = week_window(ts("2024-01-07T23:59:59Z"));
    assert_eq!(sunday.start_date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

    let monday = week_window(ts("2024-01-08T00:00:00Z"));
    assert_eq!(monday.start_date(), NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
}

#[test]
fn windows_tile_the_calendar() {
    let mut w = week_window(ts("2023-12-20T10:00:00Z"));
    for _ in 0..60 {
        let next = w.next();
        assert_eq!(next.start, w.end + Duration::milliseconds(1));
        assert_eq!(next.previous(), w);
        assert_eq!(next.start.weekday(), Weekday::Mon);
        assert_eq!(next.end.weekday(), Weekday::Sun);
        assert_eq!(next.end.hour(), 23);
        assert_eq!(next.end.timestamp_subsec_millis(), 999);
        w = next;
    }
}

#[test]
fn week_window_is_idempotent() {
    let w = week_window(ts("2024-02-29T13:37:00Z"));
    assert_eq!(week_window(w.start), w);
    assert_eq!(week_window(w.end), w);
    assert_eq!(w.days().len(), 7);
}

fn sheet(window: &WeekWindow, status: TimesheetStatus) -> Timesheet {
    Timesheet::for_window(window, status)
}

#[test]
fn list_match_beats_standalone_status() {
    let w = week_window(ts("2024-01-03T12:00:00Z"));
    let list = vec![sheet(&w, TimesheetStatus::Approved)];
    let status = reconcile_status(&list, Some(TimesheetStatus::Submitted), &w, PeriodMatch::Exact);
    assert_eq!(status, TimesheetStatus::Approved);
}

#[test]
fn standalone_status_then_not_submitted() {
    let w = week_window(ts("2024-01-03T12:00:00Z"));
    let other = vec![sheet(&w.previous(), TimesheetStatus::Approved)];

    assert_eq!(
        reconcile_status(&other, Some(TimesheetStatus::Rejected), &w, PeriodMatch::Exact),
        TimesheetStatus::Rejected
    );
    assert_eq!(
        reconcile_status(&other, None, &w, PeriodMatch::Exact),
        TimesheetStatus::NotSubmitted
    );
}

#[test]
fn calendar_date_mode_tolerates_drift() {
    let w = week_window(ts("2024-01-03T12:00:00Z"));
    let mut drifted = sheet(&w, TimesheetStatus::Submitted);
    drifted.period_end = w.end - Duration::seconds(59);

    let list = vec![drifted];
    assert_eq!(
        reconcile_status(&list, None, &w, PeriodMatch::Exact),
        TimesheetStatus::NotSubmitted
    );
    assert_eq!(
        reconcile_status(&list, None, &w, PeriodMatch::CalendarDate),
        TimesheetStatus::Submitted
    );
}

#[test]
fn week_summary_credits_clock_in_day() {
    let w = week_window(ts("2024-01-03T12:00:00Z"));
    let entries = vec![
        TimeEntry::parse("2024-01-03T09:00:00Z", Some("2024-01-03T17:00:00Z"))
            .unwrap()
            .with_break_str("2024-01-03T12:00:00Z", Some("2024-01-03T12:30:00Z"))
            .unwrap(),
        // night shift crossing into Thursday
        TimeEntry::parse("2024-01-04T22:00:00Z", Some("2024-01-05T06:00:00Z")).unwrap(),
        // previous week, ignored
        TimeEntry::parse("2023-12-31T09:00:00Z", Some("2023-12-31T10:00:00Z")).unwrap(),
    ];

    let s = Core::build_week_summary(&entries, w, ts("2024-01-08T00:00:00Z"), 40 * 3_600_000);
    assert_eq!(s.lines.len(), 2);
    assert_eq!(s.total_ms, 27_000_000 + 8 * 3_600_000);
    assert_eq!(s.per_day[&NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()], 8 * 3_600_000);
    assert_eq!(s.per_day[&NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()], 0);
    assert_eq!(s.surplus_ms, s.total_ms - 40 * 3_600_000);
    assert!(!s.has_open_entries());
}

#[test]
fn duration_formats() {
    assert_eq!(parse_duration_to_minutes("40h").unwrap(), 2400);
    assert_eq!(parse_duration_to_minutes("37h30m").unwrap(), 2250);
    assert_eq!(parse_duration_to_minutes("37h 30m").unwrap(), 2250);
    assert_eq!(parse_duration_to_minutes("2250m").unwrap(), 2250);
    assert_eq!(parse_duration_to_minutes("37:30").unwrap(), 2250);
    assert!(parse_duration_to_minutes("forty").is_err());
}

#[test]
fn naive_timestamps_are_utc() {
    assert_eq!(ts("2024-01-03 09:00"), ts("2024-01-03T09:00:00Z"));
    assert_eq!(ts("2024-01-03T10:00:00+01:00"), ts("2024-01-03T09:00:00Z"));
    assert_eq!(ts("2024-01-03"), ts("2024-01-03T00:00:00Z"));
    assert!(parse_timestamp("03/01/2024").is_err());
}
