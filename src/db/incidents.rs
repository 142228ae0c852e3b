use crate::db::queries::{opt_ts_column, ts_column};
use crate::errors::{AppError, AppResult};
use crate::models::incident::{Incident, IncidentStatus, Severity};
use crate::utils::time::to_db;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn conversion_error(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

fn map_incident(row: &Row) -> rusqlite::Result<Incident> {
    let severity: String = row.get("severity")?;
    let status: String = row.get("status")?;

    Ok(Incident {
        id: row.get("id")?,
        tenant_id: row.get("tenant_id")?,
        reporter: row.get("reporter")?,
        title: row.get("title")?,
        description: row.get("description")?,
        severity: severity.parse::<Severity>().map_err(conversion_error)?,
        phi_involved: row.get::<_, i64>("phi_involved")? == 1,
        affected_records: row.get("affected_records")?,
        status: status.parse::<IncidentStatus>().map_err(conversion_error)?,
        occurred_at: ts_column(row, "occurred_at")?,
        reported_at: ts_column(row, "reported_at")?,
        resolved_at: opt_ts_column(row, "resolved_at")?,
    })
}

pub fn insert_incident(conn: &Connection, inc: &Incident) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO incidents
            (tenant_id, reporter, title, description, severity, phi_involved,
             affected_records, status, occurred_at, reported_at, resolved_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, NULL)",
        params![
            inc.tenant_id,
            inc.reporter,
            inc.title,
            inc.description,
            inc.severity.to_db_str(),
            if inc.phi_involved { 1 } else { 0 },
            inc.affected_records,
            inc.status.to_db_str(),
            to_db(&inc.occurred_at),
            to_db(&inc.reported_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_incident(conn: &Connection, tenant_id: i64, id: i64) -> AppResult<Option<Incident>> {
    let inc = conn
        .query_row(
            "SELECT * FROM incidents WHERE tenant_id = ?1 AND id = ?2",
            params![tenant_id, id],
            map_incident,
        )
        .optional()?;
    Ok(inc)
}

pub fn list_incidents(
    conn: &Connection,
    tenant_id: i64,
    only_unresolved: bool,
    bounds: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AppResult<Vec<Incident>> {
    let (from, to) = match bounds {
        Some((f, t)) => (to_db(&f), to_db(&t)),
        None => ("0000".to_string(), "9999".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT * FROM incidents
         WHERE tenant_id = ?1
           AND (?2 = 0 OR status <> 'RESOLVED')
           AND occurred_at BETWEEN ?3 AND ?4
         ORDER BY occurred_at ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![tenant_id, if only_unresolved { 1 } else { 0 }, from, to],
        map_incident,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_status(
    conn: &Connection,
    id: i64,
    status: IncidentStatus,
    resolved_at: Option<&DateTime<Utc>>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE incidents SET status = ?1, resolved_at = ?2 WHERE id = ?3",
        params![status.to_db_str(), resolved_at.map(to_db), id],
    )?;
    Ok(())
}
