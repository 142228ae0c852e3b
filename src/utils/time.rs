//! Timestamp utilities: parsing user input, DB (de)serialization, work durations.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// DB / export representation: `2024-01-01T09:00:00.000Z`.
/// Fixed width, so lexical order equals chronological order in SQL.
pub fn to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn from_db(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a user-supplied timestamp.
///
/// Accepted:
/// - RFC 3339 (`2024-01-01T09:00:00Z`, `2024-01-01T10:00:00+01:00`)
/// - `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]` (UTC)
/// - `YYYY-MM-DD` (midnight UTC)
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive_formats = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    for fmt in naive_formats.iter() {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.and_utc());
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    Err(AppError::InvalidTimestamp(s.to_string()))
}

pub fn parse_optional_timestamp(input: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    input.map(|s| parse_timestamp(s)).transpose()
}

/// Short human form used in listings: `2024-01-01 09:00`.
pub fn short(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

pub fn hhmm(ts: &DateTime<Utc>) -> String {
    ts.format("%H:%M").to_string()
}

/// Parse durations like `40h`, `37h30m`, `37h 30m`, `2250m`, `37:30` into minutes.
pub fn parse_duration_to_minutes(s: &str) -> AppResult<i64> {
    let raw = s.trim().to_lowercase().replace(' ', "");
    let invalid = || AppError::InvalidDuration(s.to_string());

    if raw.is_empty() {
        return Err(invalid());
    }

    if let Some((h, m)) = raw.split_once(':') {
        let h: i64 = h.parse().map_err(|_| invalid())?;
        let m: i64 = m.parse().map_err(|_| invalid())?;
        if !(0..60).contains(&m) {
            return Err(invalid());
        }
        return Ok(h * 60 + m);
    }

    let mut total = 0i64;
    let mut digits = String::new();
    let mut seen_unit = false;

    for c in raw.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'h' | 'm' => {
                let n: i64 = digits.parse().map_err(|_| invalid())?;
                total += if c == 'h' { n * 60 } else { n };
                digits.clear();
                seen_unit = true;
            }
            _ => return Err(invalid()),
        }
    }

    // trailing bare number: hours when alone ("40"), minutes after hours ("37h30")
    if !digits.is_empty() {
        let n: i64 = digits.parse().map_err(|_| invalid())?;
        total += if seen_unit { n } else { n * 60 };
    }

    Ok(total)
}
