pub mod backup;
pub mod calculator;
pub mod clock;
pub mod config;
pub mod incident;
pub mod log;
pub mod logic;
pub mod tenant;
pub mod timeclock;
pub mod timesheet;
