use crate::db::incidents::{find_incident, insert_incident, update_status};
use crate::db::log::{AuditOp, ttlog};
use crate::db::pool::DbPool;
use crate::db::tenants::find_staff;
use crate::errors::{AppError, AppResult};
use crate::models::incident::{Incident, IncidentStatus, Severity};
use crate::models::tenant::Tenant;
use chrono::{DateTime, Utc};

/// Input of `incident --add`.
pub struct NewIncident<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub severity: Severity,
    pub phi_involved: bool,
    pub affected_records: i64,
    pub reporter: Option<&'a str>,
    pub occurred_at: DateTime<Utc>,
}

pub struct IncidentLogic;

impl IncidentLogic {
    pub fn report(
        pool: &mut DbPool,
        tenant: &Tenant,
        input: NewIncident<'_>,
        now: DateTime<Utc>,
    ) -> AppResult<Incident> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidIncident("title cannot be empty".into()));
        }
        if input.affected_records < 0 {
            return Err(AppError::InvalidIncident(format!(
                "affected records cannot be negative ({})",
                input.affected_records
            )));
        }
        if let Some(code) = input.reporter
            && find_staff(&pool.conn, tenant.id, code)?.is_none()
        {
            return Err(AppError::UnknownStaff(code.to_string()));
        }

        let mut incident = Incident {
            id: 0,
            tenant_id: tenant.id,
            reporter: input.reporter.map(str::to_string),
            title: title.to_string(),
            description: input.description.trim().to_string(),
            severity: input.severity,
            phi_involved: input.phi_involved,
            affected_records: input.affected_records,
            status: IncidentStatus::Open,
            occurred_at: input.occurred_at,
            reported_at: now,
            resolved_at: None,
        };

        let id = pool.with_tx(|tx| {
            let id = insert_incident(tx, &incident)?;
            ttlog(
                tx,
                &now,
                AuditOp::IncidentAdd,
                &format!("{}/#{}", tenant.slug, id),
                &format!(
                    "[{}] {}{}",
                    incident.severity,
                    incident.title,
                    if incident.phi_involved { " (PHI)" } else { "" }
                ),
            )?;
            Ok::<_, AppError>(id)
        })?;

        incident.id = id;
        Ok(incident)
    }

    pub fn set_status(
        pool: &mut DbPool,
        tenant: &Tenant,
        id: i64,
        next: IncidentStatus,
        now: DateTime<Utc>,
    ) -> AppResult<Incident> {
        let mut incident =
            find_incident(&pool.conn, tenant.id, id)?.ok_or(AppError::UnknownIncident(id))?;

        let next = incident.status.move_to(next)?;
        let resolved_at = (next == IncidentStatus::Resolved).then_some(now);

        pool.with_tx(|tx| {
            update_status(tx, id, next, resolved_at.as_ref())?;
            ttlog(
                tx,
                &now,
                AuditOp::IncidentUpdate,
                &format!("{}/#{}", tenant.slug, id),
                &format!("{} → {}", incident.status, next),
            )
        })?;

        incident.status = next;
        incident.resolved_at = resolved_at;
        Ok(incident)
    }
}
