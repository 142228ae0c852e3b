use crate::core::backup::zip_file;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result};
use std::path::Path;

/// One schema step. Applied at most once; recorded in `log` as
/// `operation = 'migration_applied'`, `target = version`.
pub struct Migration {
    pub version: &'static str,
    pub description: &'static str,
    pub sql: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20240105_0001_create_tenants_staff",
        description: "Created tenants and staff tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS tenants (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            slug        TEXT NOT NULL UNIQUE,
            name        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS staff (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            tenant_id   INTEGER NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
            code        TEXT NOT NULL,
            full_name   TEXT NOT NULL,
            active      INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL,
            UNIQUE (tenant_id, code)
        );
        "#,
    },
    Migration {
        version: "20240105_0002_create_time_entries",
        description: "Created time_entries and breaks tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            tenant_id   INTEGER NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
            staff_id    INTEGER NOT NULL REFERENCES staff(id) ON DELETE CASCADE,
            clock_in    TEXT NOT NULL,
            clock_out   TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_staff_in ON time_entries(staff_id, clock_in);

        CREATE TABLE IF NOT EXISTS breaks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            entry_id    INTEGER NOT NULL REFERENCES time_entries(id) ON DELETE CASCADE,
            start_at    TEXT NOT NULL,
            end_at      TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_breaks_entry ON breaks(entry_id, start_at);
        "#,
    },
    Migration {
        version: "20240112_0003_create_timesheets",
        description: "Created timesheets table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS timesheets (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            tenant_id         INTEGER NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
            staff_id          INTEGER NOT NULL REFERENCES staff(id) ON DELETE CASCADE,
            period_start      TEXT NOT NULL,
            period_end        TEXT NOT NULL,
            total_ms          INTEGER NOT NULL DEFAULT 0,
            status            TEXT NOT NULL DEFAULT 'NOT_SUBMITTED'
                              CHECK(status IN ('NOT_SUBMITTED','SUBMITTED','APPROVED','REJECTED')),
            approver          TEXT,
            rejection_reason  TEXT,
            notes             TEXT,
            submitted_at      TEXT,
            decided_at        TEXT,
            UNIQUE (tenant_id, staff_id, period_start)
        );
        "#,
    },
    Migration {
        version: "20240220_0004_create_incidents",
        description: "Created incidents table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS incidents (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            tenant_id         INTEGER NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
            reporter          TEXT,
            title             TEXT NOT NULL,
            description       TEXT NOT NULL DEFAULT '',
            severity          TEXT NOT NULL CHECK(severity IN ('LOW','MEDIUM','HIGH','CRITICAL')),
            phi_involved      INTEGER NOT NULL DEFAULT 0,
            affected_records  INTEGER NOT NULL DEFAULT 0,
            status            TEXT NOT NULL DEFAULT 'OPEN'
                              CHECK(status IN ('OPEN','INVESTIGATING','RESOLVED')),
            occurred_at       TEXT NOT NULL,
            reported_at       TEXT NOT NULL,
            resolved_at       TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_incidents_tenant ON incidents(tenant_id, occurred_at);
        "#,
    },
    Migration {
        version: "20240305_0005_add_staff_role",
        description: "Added role column to staff",
        sql: "ALTER TABLE staff ADD COLUMN role TEXT NOT NULL DEFAULT '';",
    },
];

/// Ensure that the `log` table exists: it doubles as migration ledger.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions not yet applied, in order.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static Migration>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m);
        }
    }
    Ok(out)
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        rusqlite::params![Utc::now().to_rfc3339(), m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Zip the database next to itself before upgrading an existing schema.
fn backup_before_migration(conn: &Connection) -> AppResult<()> {
    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    if db_path.is_empty() {
        warning("In-memory or unnamed database: pre-migration backup skipped.");
        return Ok(());
    }

    let src = Path::new(&db_path);
    let dest = src.with_file_name(format!(
        "{}-pre-migration-backup.zip",
        Utc::now().format("%Y%m%d_%H%M%S")
    ));

    zip_file(src, &dest)?;
    success(format!("📦 Pre-migration backup created: {}", dest.display()));
    Ok(())
}

/// Public entry point: run all pending migrations. Returns how many ran.
///
/// Called by db::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    let pending = pending_migrations(conn)?;

    if pending.is_empty() {
        return Ok(0);
    }

    // Upgrading a schema that already holds data → safety copy first
    let already_initialized = pending.len() < MIGRATIONS.len();
    if already_initialized {
        warning("Schema upgrade detected: creating safety backup before migration...");
        backup_before_migration(conn)?;
    }

    for m in &pending {
        apply(conn, m)?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
    }

    Ok(pending.len())
}
