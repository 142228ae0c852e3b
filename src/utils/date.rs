use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Resolve an optional `--date` argument: explicit date, full timestamp, or `now`.
pub fn reference_date(input: Option<&String>, now: DateTime<Utc>) -> AppResult<NaiveDate> {
    match input {
        None => Ok(now.date_naive()),
        Some(s) => {
            if let Some(d) = parse_date(s) {
                return Ok(d);
            }
            crate::utils::time::parse_timestamp(s)
                .map(|ts| ts.date_naive())
                .map_err(|_| AppError::InvalidDate(s.to_string()))
        }
    }
}

pub fn month_name(m: u32) -> &'static str {
    match m {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}
