//! Formatting utilities used for CLI and export outputs.

/// Milliseconds → `07h 30m` (or `07:30` when `short`), optional sign.
/// Sub-minute remainders are truncated.
pub fn ms2readable(ms: i64, want_sign: bool, short: bool) -> String {
    mins2readable(ms / 60_000, want_sign, short)
}

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Decimal hours with two digits, as shown on timesheets: `37.50`.
pub fn ms2hours(ms: i64) -> String {
    format!("{:.2}", ms as f64 / 3_600_000.0)
}

/// Weekday label according to the `show_weekday` config value
/// (`None`, `Short`, `Medium`, `Long`).
pub fn weekday_label(date: &chrono::NaiveDate, mode: &str) -> String {
    use chrono::Datelike;

    let long = match date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    };

    match mode.to_lowercase().as_str() {
        "short" => long[..2].to_string(),
        "medium" => long[..3].to_string(),
        "long" => long.to_string(),
        _ => String::new(),
    }
}
