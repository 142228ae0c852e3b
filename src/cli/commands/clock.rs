use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::calculator::working_ms;
use crate::core::timeclock::{BreakPhase, ClockLogic};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::ms2readable;
use crate::utils::time::{parse_optional_timestamp, short};

/// `in`, `out` and `break`.
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let mut pool = ctx.open_pool()?;

    match cmd {
        Commands::In { staff, at } => {
            let (tenant, staff) = ctx.staff(&pool, staff)?;
            let at = parse_optional_timestamp(at.as_ref())?.unwrap_or_else(|| ctx.now());

            ClockLogic::clock_in(&mut pool, &tenant, &staff, at, ctx.now())?;
            success(format!("{} clocked in at {}", staff.label(), short(&at)));
        }

        Commands::Out { staff, at } => {
            let (tenant, staff) = ctx.staff(&pool, staff)?;
            let at = parse_optional_timestamp(at.as_ref())?.unwrap_or_else(|| ctx.now());

            let entry = ClockLogic::clock_out(&mut pool, &tenant, &staff, at, ctx.now())?;
            success(format!(
                "{} clocked out at {} (worked {})",
                staff.label(),
                short(&at),
                ms2readable(working_ms(&entry, at), false, false)
            ));
        }

        Commands::Break { staff, start, at, .. } => {
            let (tenant, staff) = ctx.staff(&pool, staff)?;
            let at = parse_optional_timestamp(at.as_ref())?.unwrap_or_else(|| ctx.now());
            let phase = if *start {
                BreakPhase::Start
            } else {
                BreakPhase::End
            };

            ClockLogic::apply_break(&mut pool, &tenant, &staff, phase, at, ctx.now())?;
            let verb = match phase {
                BreakPhase::Start => "started",
                BreakPhase::End => "ended",
            };
            success(format!("Break {} for {} at {}", verb, staff.label(), short(&at)));
        }

        _ => {}
    }

    Ok(())
}
