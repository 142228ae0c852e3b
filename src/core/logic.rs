use crate::core::calculator::{WeekWindow, total_break_ms, working_ms};
use crate::models::time_entry::TimeEntry;
use crate::models::week_summary::{EntryLine, WeekSummary};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub struct Core;

impl Core {
    /// Aggregate the entries whose clock-in falls inside `window`.
    ///
    /// Each entry is credited in full to the day of its clock-in, including
    /// shifts that run past midnight.
    pub fn build_week_summary(
        entries: &[TimeEntry],
        window: WeekWindow,
        now: DateTime<Utc>,
        expected_ms: i64,
    ) -> WeekSummary {
        let mut sorted: Vec<&TimeEntry> = entries
            .iter()
            .filter(|e| window.contains(e.clock_in))
            .collect();
        sorted.sort_by_key(|e| e.clock_in);

        let mut per_day: BTreeMap<_, i64> = window.days().into_iter().map(|d| (d, 0)).collect();
        let mut lines = Vec::with_capacity(sorted.len());
        let mut total = 0;

        for entry in sorted {
            let line = Self::entry_line(entry, now);
            total += line.working_ms;
            *per_day.entry(entry.clock_in.date_naive()).or_insert(0) += line.working_ms;
            lines.push(line);
        }

        WeekSummary {
            window,
            lines,
            per_day,
            total_ms: total,
            expected_ms,
            surplus_ms: total - expected_ms,
        }
    }

    pub fn entry_line(entry: &TimeEntry, now: DateTime<Utc>) -> EntryLine {
        EntryLine {
            entry: entry.clone(),
            working_ms: working_ms(entry, now),
            break_ms: total_break_ms(entry, now),
            open: entry.is_open(),
        }
    }
}
