//! caretime library root.
//! Exposes the CLI parser, the high-level run() function and internal modules.

pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use context::AppContext;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli, ctx),
        Commands::Config { .. } => commands::config::handle(&cli.command, ctx),
        Commands::Db { .. } => commands::db::handle(&cli.command, ctx),
        Commands::Log { .. } => commands::log::handle(&cli.command, ctx),
        Commands::Tenant { .. } => commands::tenant::handle(&cli.command, ctx),
        Commands::Staff { .. } => commands::staff::handle(&cli.command, ctx),
        Commands::In { .. } | Commands::Out { .. } | Commands::Break { .. } => {
            commands::clock::handle(&cli.command, ctx)
        }
        Commands::Entries { .. } => commands::entries::handle(&cli.command, ctx),
        Commands::Week { .. } => commands::week::handle(&cli.command, ctx),
        Commands::Submit { .. }
        | Commands::Approve { .. }
        | Commands::Reject { .. }
        | Commands::Timesheets { .. } => commands::timesheet::handle(&cli.command, ctx),
        Commands::Incident { .. } => commands::incident::handle(&cli.command, ctx),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, ctx),
        Commands::Export { .. } => commands::export::handle(&cli.command, ctx),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; --db wins over the configured path
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    let clock = AppContext::clock_from_arg(cli.now.as_ref())?;
    let ctx = AppContext::new(cfg, clock, cli.tenant.as_deref(), cli.test);

    dispatch(&cli, &ctx)
}
