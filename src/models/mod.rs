pub mod incident;
pub mod tenant;
pub mod time_entry;
pub mod timesheet;
pub mod week_summary;
