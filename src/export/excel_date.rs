// src/export/excel_date.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm";
const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Interpret an exported cell as a date or date-time.
/// Returns the Excel number format and the serial value.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some((DATETIME_FORMAT, excel_serial(&dt.naive_utc())));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some((DATETIME_FORMAT, excel_serial(&dt)));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some((DATE_FORMAT, excel_serial(&d.and_time(NaiveTime::MIN))));
    }

    None
}

/// Days since 1899-12-30, fractional part = time of day.
fn excel_serial(dt: &NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN);

    let secs = (*dt - epoch).num_seconds() as f64;
    secs / 86_400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_serials() {
        assert_eq!(parse_to_excel_date("2024-01-01"), Some((DATE_FORMAT, 45292.0)));
        let (fmt, v) = parse_to_excel_date("2024-01-01 12:00:00").unwrap();
        assert_eq!(fmt, DATETIME_FORMAT);
        assert!((v - 45292.5).abs() < 1e-9);
    }

    #[test]
    fn plain_text_is_not_a_date() {
        assert!(parse_to_excel_date("RN-01").is_none());
        assert!(parse_to_excel_date("07h 30m").is_none());
    }
}
