use crate::cli::parser::Cli;
use crate::config::Config;
use crate::context::AppContext;
use crate::core::tenant::TenantLogic;
use crate::db::initialize::init_db;
use crate::db::log::{AuditOp, ttlog};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// Creates the config directory and file (skipped with `--test`), the SQLite
/// database with every migration applied, and the active tenant.
pub fn handle(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    println!("⚙️  Initializing caretime…");

    let db_path = Config::init_all(cli.db.clone(), ctx.test_mode)?;
    let db_path = db_path.to_string_lossy().to_string();

    let mut pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    let now = ctx.now();
    let tenant = TenantLogic::ensure(&mut pool, &ctx.tenant, now)?;

    if let Err(e) = ttlog(
        &pool.conn,
        &now,
        AuditOp::Init,
        &db_path,
        &format!("Database initialized, tenant '{}'", tenant.slug),
    ) {
        warning(format!("Failed to write audit log: {}", e));
    }

    success(format!("Database initialized at {}", db_path));
    success(format!("Active tenant: {} ({})", tenant.slug, tenant.name));
    Ok(())
}
