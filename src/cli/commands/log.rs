use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Log { print: true, op } = cmd {
        let pool = ctx.open_pool()?;
        LogLogic::print_log(&pool, op.as_deref())?;
    }

    Ok(())
}
