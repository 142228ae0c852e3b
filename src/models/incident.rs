use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Days after discovery within which a PHI breach must be notified.
pub const PHI_NOTIFICATION_DAYS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl FromStr for Severity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" | "L" => Ok(Severity::Low),
            "MEDIUM" | "M" => Ok(Severity::Medium),
            "HIGH" | "H" => Ok(Severity::High),
            "CRITICAL" | "C" => Ok(Severity::Critical),
            _ => Err(AppError::InvalidSeverity(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    Open,
    Investigating,
    Resolved,
}

impl IncidentStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            IncidentStatus::Open => "OPEN",
            IncidentStatus::Investigating => "INVESTIGATING",
            IncidentStatus::Resolved => "RESOLVED",
        }
    }

    /// A resolved incident is closed for good; everything else may move freely.
    pub fn move_to(self, next: IncidentStatus) -> AppResult<IncidentStatus> {
        if self == IncidentStatus::Resolved {
            return Err(AppError::IncidentClosed(next.to_string()));
        }
        Ok(next)
    }
}

impl FromStr for IncidentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OPEN" => Ok(IncidentStatus::Open),
            "INVESTIGATING" => Ok(IncidentStatus::Investigating),
            "RESOLVED" => Ok(IncidentStatus::Resolved),
            _ => Err(AppError::InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Incident {
    pub id: i64,
    pub tenant_id: i64,
    pub reporter: Option<String>, // staff code
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub phi_involved: bool,
    pub affected_records: i64,
    pub status: IncidentStatus,
    pub occurred_at: DateTime<Utc>,
    pub reported_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Incident {
    pub fn notification_deadline(&self) -> Option<DateTime<Utc>> {
        self.phi_involved
            .then(|| self.occurred_at + Duration::days(PHI_NOTIFICATION_DAYS))
    }

    /// True when PHI is involved, the incident is unresolved and the deadline has passed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != IncidentStatus::Resolved
            && self.notification_deadline().is_some_and(|d| now > d)
    }
}
