use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        data,
        force,
    } = cmd
    {
        let mut pool = ctx.open_pool()?;
        let tenant = ctx.tenant(&pool)?;

        let req = ExportRequest {
            format: *format,
            data: *data,
            file,
            range: range.as_deref(),
            force: *force,
            now: ctx.now(),
        };
        ExportLogic::export(&mut pool, &tenant, &req)?;
    }
    Ok(())
}
