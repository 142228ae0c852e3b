//! Per-invocation context handed to every command handler.

use crate::config::Config;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::tenants::{find_staff, find_tenant};
use crate::errors::{AppError, AppResult};
use crate::models::tenant::{Staff, Tenant, normalize_slug};
use crate::utils::time::parse_timestamp;
use chrono::{DateTime, Utc};

pub struct AppContext {
    pub cfg: Config,
    pub clock: Box<dyn Clock>,
    /// Active tenant slug (`--tenant` or `default_tenant`)
    pub tenant: String,
    pub test_mode: bool,
}

impl AppContext {
    pub fn new(cfg: Config, clock: Box<dyn Clock>, tenant: Option<&str>, test_mode: bool) -> Self {
        let tenant = normalize_slug(tenant.unwrap_or(&cfg.default_tenant));
        Self {
            cfg,
            clock,
            tenant,
            test_mode,
        }
    }

    /// `--now` installs a fixed clock; otherwise wall time.
    pub fn clock_from_arg(now: Option<&String>) -> AppResult<Box<dyn Clock>> {
        Ok(match now {
            Some(s) => Box::new(FixedClock(parse_timestamp(s)?)),
            None => Box::new(SystemClock),
        })
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Open the configured database, bringing its schema up to date.
    pub fn open_pool(&self) -> AppResult<DbPool> {
        let pool = DbPool::new(&self.cfg.database)?;
        init_db(&pool.conn)?;
        Ok(pool)
    }

    pub fn tenant(&self, pool: &DbPool) -> AppResult<Tenant> {
        find_tenant(&pool.conn, &self.tenant)?
            .ok_or_else(|| AppError::UnknownTenant(self.tenant.clone()))
    }

    pub fn staff(&self, pool: &DbPool, code: &str) -> AppResult<(Tenant, Staff)> {
        let tenant = self.tenant(pool)?;
        let staff = find_staff(&pool.conn, tenant.id, code)?
            .ok_or_else(|| AppError::UnknownStaff(code.to_string()))?;
        Ok((tenant, staff))
    }
}
