use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::tenant::StaffLogic;
use crate::db::tenants::list_staff;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Staff {
        add,
        name,
        role,
        list,
        deactivate,
    } = cmd
    {
        let mut pool = ctx.open_pool()?;
        let tenant = ctx.tenant(&pool)?;

        if let Some(code) = add {
            let staff = StaffLogic::register(
                &mut pool,
                &tenant,
                code,
                name.as_deref().unwrap_or_default(),
                role.as_deref(),
                ctx.now(),
            )?;
            success(format!("Registered {} in '{}'", staff.label(), tenant.slug));
        }

        if let Some(code) = deactivate {
            let staff = StaffLogic::deactivate(&mut pool, &tenant, code, ctx.now())?;
            success(format!("{} deactivated", staff.label()));
        }

        if *list {
            let staff = list_staff(&pool.conn, tenant.id)?;
            header(format!("Staff of {}", tenant.name));
            if staff.is_empty() {
                info("No staff registered.");
                return Ok(());
            }

            let mut table = Table::new(
                vec![
                    Column::left("CODE"),
                    Column::left("NAME"),
                    Column::left("ROLE"),
                    Column::left("ACTIVE"),
                ],
                ctx.cfg.separator(),
            );
            for s in staff {
                table.add_row(vec![
                    s.code,
                    s.full_name,
                    if s.role.is_empty() { "-".into() } else { s.role },
                    if s.active { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
