use crate::errors::{AppError, AppResult};
use crate::models::tenant::{Staff, Tenant};
use crate::utils::time::to_db;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

fn map_tenant(row: &Row) -> rusqlite::Result<Tenant> {
    Ok(Tenant {
        id: row.get("id")?,
        slug: row.get("slug")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

fn map_staff(row: &Row) -> rusqlite::Result<Staff> {
    Ok(Staff {
        id: row.get("id")?,
        tenant_id: row.get("tenant_id")?,
        code: row.get("code")?,
        full_name: row.get("full_name")?,
        role: row.get("role")?,
        active: row.get::<_, i64>("active")? == 1,
        created_at: row.get("created_at")?,
    })
}

/// Map UNIQUE violations to `AppError::Duplicate`.
fn unique_or(e: rusqlite::Error, what: &str) -> AppError {
    match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => AppError::Duplicate(what.to_string()),
        _ => AppError::Db(e),
    }
}

pub fn insert_tenant(
    conn: &Connection,
    slug: &str,
    name: &str,
    now: &DateTime<Utc>,
) -> AppResult<Tenant> {
    let now = to_db(now);

    conn.execute(
        "INSERT INTO tenants (slug, name, created_at) VALUES (?1, ?2, ?3)",
        params![slug, name, now],
    )
    .map_err(|e| unique_or(e, slug))?;

    Ok(Tenant {
        id: conn.last_insert_rowid(),
        slug: slug.to_string(),
        name: name.to_string(),
        created_at: now,
    })
}

pub fn find_tenant(conn: &Connection, slug: &str) -> AppResult<Option<Tenant>> {
    let t = conn
        .query_row(
            "SELECT * FROM tenants WHERE slug = ?1",
            [slug],
            map_tenant,
        )
        .optional()?;
    Ok(t)
}

pub fn list_tenants(conn: &Connection) -> AppResult<Vec<Tenant>> {
    let mut stmt = conn.prepare("SELECT * FROM tenants ORDER BY slug ASC")?;
    let rows = stmt.query_map([], map_tenant)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_staff(
    conn: &Connection,
    tenant_id: i64,
    code: &str,
    full_name: &str,
    role: &str,
    now: &DateTime<Utc>,
) -> AppResult<Staff> {
    let now = to_db(now);

    conn.execute(
        "INSERT INTO staff (tenant_id, code, full_name, role, active, created_at)
         VALUES (?1, ?2, ?3, ?4, 1, ?5)",
        params![tenant_id, code, full_name, role, now],
    )
    .map_err(|e| unique_or(e, code))?;

    Ok(Staff {
        id: conn.last_insert_rowid(),
        tenant_id,
        code: code.to_string(),
        full_name: full_name.to_string(),
        role: role.to_string(),
        active: true,
        created_at: now,
    })
}

pub fn find_staff(conn: &Connection, tenant_id: i64, code: &str) -> AppResult<Option<Staff>> {
    let s = conn
        .query_row(
            "SELECT * FROM staff WHERE tenant_id = ?1 AND code = ?2",
            params![tenant_id, code],
            map_staff,
        )
        .optional()?;
    Ok(s)
}

pub fn list_staff(conn: &Connection, tenant_id: i64) -> AppResult<Vec<Staff>> {
    let mut stmt = conn.prepare("SELECT * FROM staff WHERE tenant_id = ?1 ORDER BY code ASC")?;
    let rows = stmt.query_map([tenant_id], map_staff)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_staff_active(conn: &Connection, staff_id: i64, active: bool) -> AppResult<()> {
    conn.execute(
        "UPDATE staff SET active = ?1 WHERE id = ?2",
        params![if active { 1 } else { 0 }, staff_id],
    )?;
    Ok(())
}
