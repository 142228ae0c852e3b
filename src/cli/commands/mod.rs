pub mod backup;
pub mod clock;
pub mod config;
pub mod db;
pub mod entries;
pub mod export;
pub mod incident;
pub mod init;
pub mod log;
pub mod staff;
pub mod tenant;
pub mod timesheet;
pub mod week;
