use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::tenant::TenantLogic;
use crate::db::tenants::list_tenants;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Tenant { add, name, list } = cmd {
        let mut pool = ctx.open_pool()?;

        if let Some(slug) = add {
            let tenant = TenantLogic::create(&mut pool, slug, name.as_deref(), ctx.now())?;
            success(format!("Tenant '{}' created ({})", tenant.slug, tenant.name));
        }

        if *list {
            let tenants = list_tenants(&pool.conn)?;
            if tenants.is_empty() {
                info("No tenants. Run `init` or `tenant --add`.");
                return Ok(());
            }

            let mut table = Table::new(
                vec![
                    Column::left(""),
                    Column::left("SLUG"),
                    Column::left("NAME"),
                    Column::left("CREATED"),
                ],
                ctx.cfg.separator(),
            );
            for t in tenants {
                let marker = if t.slug == ctx.tenant { "*" } else { "" };
                table.add_row(vec![
                    marker.to_string(),
                    t.slug,
                    t.name,
                    t.created_at.chars().take(10).collect(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
