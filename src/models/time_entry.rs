use crate::errors::AppResult;
use crate::utils::time::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A pause inside a time entry. `end == None` means the break is ongoing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Break {
    pub id: i64,
    pub start: DateTime<Utc>,        // ⇔ breaks.start_at
    pub end: Option<DateTime<Utc>>,  // ⇔ breaks.end_at (NULL while ongoing)
}

impl Break {
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        Self { id: 0, start, end }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// One clock-in session. `clock_out == None` means the shift is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub tenant_id: i64,
    pub staff_id: i64,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub breaks: Vec<Break>,
}

impl TimeEntry {
    /// Detached entry (ids = 0), handy for calculations and tests.
    pub fn new(clock_in: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            tenant_id: 0,
            staff_id: 0,
            clock_in,
            clock_out: None,
            breaks: Vec::new(),
        }
    }

    /// Build an entry from textual timestamps (RFC 3339 or `YYYY-MM-DD HH:MM[:SS]`).
    pub fn parse(clock_in: &str, clock_out: Option<&str>) -> AppResult<Self> {
        let mut entry = Self::new(parse_timestamp(clock_in)?);
        if let Some(out) = clock_out {
            entry.clock_out = Some(parse_timestamp(out)?);
        }
        Ok(entry)
    }

    pub fn with_break(mut self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        self.breaks.push(Break::new(start, end));
        self
    }

    /// Same as `with_break`, from textual timestamps.
    pub fn with_break_str(self, start: &str, end: Option<&str>) -> AppResult<Self> {
        let start = parse_timestamp(start)?;
        let end = end.map(parse_timestamp).transpose()?;
        Ok(self.with_break(start, end))
    }

    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    pub fn open_break(&self) -> Option<&Break> {
        self.breaks.iter().rev().find(|b| b.is_open())
    }
}
