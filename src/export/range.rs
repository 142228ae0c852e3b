// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

fn invalid(r: &str, why: &str) -> AppError {
    AppError::InvalidRange(format!("{r}: {why}"))
}

/// Parse one side of a range into its first and last calendar day.
fn parse_part(raw: &str, whole: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = raw.trim();
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid(whole, "invalid year"))?;
            let first =
                NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(whole, "invalid year"))?;
            let last =
                NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(whole, "invalid year"))?;
            Ok((first, last))
        }
        // YYYY-MM
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid(whole, "invalid month"))?;
            Ok((first, month_last_day(first)))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d")
                .map_err(|_| invalid(whole, "invalid date"))?;
            Ok((d, d))
        }
        _ => Err(invalid(whole, "unsupported format")),
    }
}

fn month_last_day(first: NaiveDate) -> NaiveDate {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(first)
}

/// Parse `--range` / `--period`.
///
/// Accepted forms:
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `A:B` where both sides use the same form
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match r.split_once(':') {
        Some((start, end)) => {
            if start.trim().len() != end.trim().len() {
                return Err(invalid(r, "start and end must have the same format"));
            }
            let (from, _) = parse_part(start, r)?;
            let (_, to) = parse_part(end, r)?;
            if to < from {
                return Err(invalid(r, "end is before start"));
            }
            Ok((from, to))
        }
        None => parse_part(r, r),
    }
}

/// Instant bounds for a range; `None` or `all` means unbounded.
pub fn range_bounds(range: Option<&str>) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    match range {
        None => Ok(None),
        Some(r) if r.trim().eq_ignore_ascii_case("all") => Ok(None),
        Some(r) => {
            let (from, to) = parse_range(r)?;
            let start = from.and_time(chrono::NaiveTime::MIN).and_utc();
            let end = (to + Duration::days(1)).and_time(chrono::NaiveTime::MIN).and_utc()
                - Duration::milliseconds(1);
            Ok(Some((start, end)))
        }
    }
}

/// Human title for a range, used in PDF headings.
pub(crate) fn describe_range(range: Option<&str>) -> Option<String> {
    let r = range?.trim();
    if r.eq_ignore_ascii_case("all") {
        return None;
    }
    if let Some((a, b)) = r.split_once(':') {
        return Some(format!("from {} to {}", a.trim(), b.trim()));
    }
    match r.len() {
        4 => Some(format!("year {r}")),
        7 => {
            let month: u32 = r[5..7].parse().ok()?;
            Some(format!("{} {}", crate::utils::date::month_name(month), &r[0..4]))
        }
        _ => Some(r.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_range_covers_whole_month() {
        let (a, b) = parse_range("2024-02").unwrap();
        assert_eq!(a, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(b, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn december_ends_on_31st() {
        let (_, b) = parse_range("2023-12").unwrap();
        assert_eq!(b, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn mixed_formats_rejected() {
        assert!(parse_range("2024:2024-05").is_err());
        assert!(parse_range("2024-13").is_err());
        assert!(parse_range("2024-05-10:2024-05-01").is_err());
    }

    #[test]
    fn bounds_end_one_ms_before_next_day() {
        let (s, e) = range_bounds(Some("2024-01-03")).unwrap().unwrap();
        assert_eq!(s.to_rfc3339(), "2024-01-03T00:00:00+00:00");
        assert_eq!(
            e.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            "2024-01-03T23:59:59.999"
        );
        assert!(range_bounds(Some("all")).unwrap().is_none());
    }
}
