//! Monday-start week windows.
//!
//! A window runs from Monday 00:00:00.000 to Sunday 23:59:59.999 (UTC), both
//! ends inclusive. `next()` starts exactly one millisecond after `end`, so
//! consecutive windows tile the calendar.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

pub fn week_window(reference: DateTime<Utc>) -> WeekWindow {
    week_window_for_date(reference.date_naive())
}

pub fn week_window_for_date(date: NaiveDate) -> WeekWindow {
    // Sunday = 0 ... Saturday = 6
    let day = date.weekday().num_days_from_sunday() as i64;
    let diff_to_monday = (day + 6) % 7;

    let monday = date - Duration::days(diff_to_monday);
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(7) - Duration::milliseconds(1);

    WeekWindow { start, end }
}

impl WeekWindow {
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }

    pub fn next(&self) -> WeekWindow {
        week_window(self.end + Duration::milliseconds(1))
    }

    pub fn previous(&self) -> WeekWindow {
        week_window(self.start - Duration::milliseconds(1))
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Monday … Sunday
    pub fn days(&self) -> Vec<NaiveDate> {
        let monday = self.start_date();
        (0..7).map(|i| monday + Duration::days(i)).collect()
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start_date(), self.end_date())
    }
}
