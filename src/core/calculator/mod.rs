//! Weekly time aggregation: entry durations, week windows and status
//! reconciliation. Pure functions, no I/O; "now" is always passed in.

pub mod duration;
pub mod status;
pub mod week;

pub use duration::{break_ms, raw_ms, total_break_ms, working_ms, working_ms_at};
pub use status::{PeriodMatch, reconcile_status};
pub use week::{WeekWindow, week_window, week_window_for_date};
