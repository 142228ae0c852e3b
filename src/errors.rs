//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so the error
//! handling stays consistent from the SQLite layer up to `main`.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Unknown tenant '{0}' (create it with `tenant --add`)")]
    UnknownTenant(String),

    #[error("Unknown staff member '{0}'")]
    UnknownStaff(String),

    #[error("Staff member '{0}' is inactive")]
    InactiveStaff(String),

    #[error("Incident #{0} not found")]
    UnknownIncident(i64),

    #[error("'{0}' already exists")]
    Duplicate(String),

    // ---------------------------
    // Time clock errors
    // ---------------------------
    #[error("{0} is already clocked in since {1}")]
    AlreadyClockedIn(String, String),

    #[error("{0} is not clocked in")]
    NotClockedIn(String),

    #[error("{0} is already on a break since {1}")]
    BreakAlreadyOpen(String, String),

    #[error("{0} has no break in progress")]
    NoOpenBreak(String),

    #[error("Invalid interval: {end} is before {start}")]
    InvalidInterval { start: String, end: String },

    #[error("Week starting {0} is approved and can no longer be changed")]
    PeriodLocked(String),

    // ---------------------------
    // Workflow errors
    // ---------------------------
    #[error("Cannot {action} a timesheet in status {from}")]
    InvalidTransition { from: String, action: String },

    #[error("Resolved incidents are final (cannot move to {0})")]
    IncidentClosed(String),

    #[error("No timesheet submitted for week starting {0}")]
    NoTimesheet(String),

    #[error("A rejection reason is required")]
    MissingReason,

    #[error("{0} has a shift open since {1}: clock out before approving the week")]
    OpenShift(String, String),

    #[error("Invalid incident: {0}")]
    InvalidIncident(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
