//! Working time of a single entry, net of breaks.
//!
//! Open intervals (no clock-out, or a break without end) run up to `now`.
//! Every partial result is floored at zero. Breaks are summed as recorded:
//! they are not clipped to the entry span and overlaps are not merged.

use crate::core::clock::Clock;
use crate::models::time_entry::{Break, TimeEntry};
use chrono::{DateTime, Utc};

/// Milliseconds between clock-in and clock-out (or `now`), never negative.
pub fn raw_ms(entry: &TimeEntry, now: DateTime<Utc>) -> i64 {
    let end = entry.clock_out.unwrap_or(now);
    (end - entry.clock_in).num_milliseconds().max(0)
}

pub fn break_ms(b: &Break, now: DateTime<Utc>) -> i64 {
    let end = b.end.unwrap_or(now);
    (end - b.start).num_milliseconds().max(0)
}

pub fn total_break_ms(entry: &TimeEntry, now: DateTime<Utc>) -> i64 {
    entry.breaks.iter().map(|b| break_ms(b, now)).sum()
}

/// `max(0, raw - Σ breaks)`
pub fn working_ms(entry: &TimeEntry, now: DateTime<Utc>) -> i64 {
    (raw_ms(entry, now) - total_break_ms(entry, now)).max(0)
}

pub fn working_ms_at(entry: &TimeEntry, clock: &dyn Clock) -> i64 {
    working_ms(entry, clock.now())
}
