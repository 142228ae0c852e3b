use crate::db::log::{AuditOp, ttlog};
use crate::db::pool::DbPool;
use crate::db::tenants::{find_staff, find_tenant, insert_staff, insert_tenant, set_staff_active};
use crate::errors::{AppError, AppResult};
use crate::models::tenant::{Staff, Tenant, normalize_slug};
use chrono::{DateTime, Utc};

pub struct TenantLogic;

impl TenantLogic {
    pub fn create(
        pool: &mut DbPool,
        slug: &str,
        name: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Tenant> {
        let slug = normalize_slug(slug);
        if slug.is_empty() {
            return Err(AppError::Other("tenant slug cannot be empty".into()));
        }
        let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(&slug);

        pool.with_tx(|tx| {
            let tenant = insert_tenant(tx, &slug, name, &now)?;
            ttlog(tx, &now, AuditOp::TenantAdd, &slug, &format!("Tenant '{}' created", name))?;
            Ok(tenant)
        })
    }

    /// Create the tenant unless it already exists (used by `init`).
    pub fn ensure(pool: &mut DbPool, slug: &str, now: DateTime<Utc>) -> AppResult<Tenant> {
        match find_tenant(&pool.conn, &normalize_slug(slug))? {
            Some(t) => Ok(t),
            None => Self::create(pool, slug, None, now),
        }
    }
}

pub struct StaffLogic;

impl StaffLogic {
    pub fn register(
        pool: &mut DbPool,
        tenant: &Tenant,
        code: &str,
        full_name: &str,
        role: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Staff> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::Other("staff code cannot be empty".into()));
        }
        let full_name = full_name.trim();
        let role = role.unwrap_or("").trim();

        pool.with_tx(|tx| {
            let staff = insert_staff(tx, tenant.id, code, full_name, role, &now)?;
            ttlog(
                tx,
                &now,
                AuditOp::StaffAdd,
                &format!("{}/{}", tenant.slug, code),
                &format!("Registered {}", staff.label()),
            )?;
            Ok(staff)
        })
    }

    pub fn deactivate(
        pool: &mut DbPool,
        tenant: &Tenant,
        code: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Staff> {
        let mut staff = find_staff(&pool.conn, tenant.id, code)?
            .ok_or_else(|| AppError::UnknownStaff(code.to_string()))?;

        pool.with_tx(|tx| {
            set_staff_active(tx, staff.id, false)?;
            ttlog(
                tx,
                &now,
                AuditOp::StaffDeactivate,
                &format!("{}/{}", tenant.slug, code),
                "Staff member deactivated",
            )
        })?;

        staff.active = false;
        Ok(staff)
    }
}
