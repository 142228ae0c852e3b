use crate::export::{ExportData, ExportFormat};
use clap::{Parser, Subcommand};

/// Command-line interface definition for caretime
/// Staff time clock, weekly timesheets and PHI incident log on SQLite
#[derive(Parser)]
#[command(
    name = "caretime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clinic staff time clock: shifts, breaks, weekly timesheets and incident tracking using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Tenant (clinic) to operate on; defaults to `default_tenant` from the config
    #[arg(global = true, long = "tenant")]
    pub tenant: Option<String>,

    /// Pretend the current instant is TIMESTAMP (e.g. 2024-01-03T12:00:00Z)
    #[arg(global = true, long = "now", value_name = "TIMESTAMP")]
    pub now: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database, the configuration and the default tenant
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing or invalid fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing keys to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the audit log
    Log {
        #[arg(long = "print", help = "Print rows from the audit log")]
        print: bool,

        #[arg(
            long = "op",
            value_name = "OPERATION",
            help = "Only rows of this operation (e.g. clock_in)"
        )]
        op: Option<String>,
    },

    /// Create or list tenants (clinics)
    Tenant {
        #[arg(long = "add", value_name = "SLUG", help = "Create a tenant")]
        add: Option<String>,

        #[arg(long = "name", requires = "add", help = "Display name of the new tenant")]
        name: Option<String>,

        #[arg(long = "list", help = "List tenants")]
        list: bool,
    },

    /// Register, list or deactivate staff of the active tenant
    Staff {
        #[arg(
            long = "add",
            value_name = "CODE",
            requires = "name",
            help = "Register a staff member"
        )]
        add: Option<String>,

        #[arg(long = "name", help = "Full name of the new staff member")]
        name: Option<String>,

        #[arg(long = "role", help = "Role, e.g. RN, MA, front desk")]
        role: Option<String>,

        #[arg(long = "list", help = "List staff members")]
        list: bool,

        #[arg(long = "deactivate", value_name = "CODE", help = "Deactivate a staff member")]
        deactivate: Option<String>,
    },

    /// Clock in: open a new time entry
    In {
        staff: String,

        #[arg(long = "at", value_name = "TIMESTAMP", help = "Clock-in instant (default: now)")]
        at: Option<String>,
    },

    /// Clock out: close the open time entry
    Out {
        staff: String,

        #[arg(long = "at", value_name = "TIMESTAMP", help = "Clock-out instant (default: now)")]
        at: Option<String>,
    },

    /// Start or end a break on the open time entry
    Break {
        staff: String,

        #[arg(long = "start", conflicts_with = "end", required_unless_present = "end")]
        start: bool,

        #[arg(long = "end")]
        end: bool,

        #[arg(long = "at", value_name = "TIMESTAMP", help = "Break instant (default: now)")]
        at: Option<String>,
    },

    /// List time entries with breaks and working time
    Entries {
        staff: String,

        #[arg(
            long,
            short,
            value_name = "RANGE",
            help = "YYYY, YYYY-MM, YYYY-MM-DD, A:B or all (default: current week)"
        )]
        period: Option<String>,
    },

    /// Weekly summary with per-day totals, surplus and timesheet status
    Week {
        staff: String,

        #[arg(
            long = "date",
            value_name = "DATE",
            help = "Any date inside the week (default: today)"
        )]
        date: Option<String>,
    },

    /// Submit the weekly timesheet
    Submit {
        staff: String,

        #[arg(long = "date", value_name = "DATE")]
        date: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Approve a submitted weekly timesheet
    Approve {
        staff: String,

        #[arg(long = "date", value_name = "DATE")]
        date: Option<String>,

        #[arg(long = "by", value_name = "APPROVER")]
        by: String,
    },

    /// Reject a submitted weekly timesheet
    Reject {
        staff: String,

        #[arg(long = "date", value_name = "DATE")]
        date: Option<String>,

        #[arg(long = "by", value_name = "APPROVER")]
        by: String,

        #[arg(long = "reason")]
        reason: String,
    },

    /// List timesheets of the active tenant
    Timesheets {
        #[arg(long = "staff", value_name = "CODE")]
        staff: Option<String>,

        #[arg(long = "status", help = "NOT_SUBMITTED, SUBMITTED, APPROVED or REJECTED")]
        status: Option<String>,
    },

    /// Record, list or update security / PHI incidents
    Incident {
        #[arg(long = "add", value_name = "TITLE", help = "Record a new incident")]
        add: Option<String>,

        #[arg(long = "description", default_value = "")]
        description: String,

        #[arg(long = "severity", default_value = "MEDIUM", help = "LOW, MEDIUM, HIGH or CRITICAL")]
        severity: String,

        #[arg(long = "phi", help = "Protected health information is involved")]
        phi: bool,

        #[arg(long = "affected", value_name = "N", default_value_t = 0)]
        affected: i64,

        #[arg(long = "reporter", value_name = "CODE")]
        reporter: Option<String>,

        #[arg(long = "at", value_name = "TIMESTAMP", help = "When it happened (default: now)")]
        at: Option<String>,

        #[arg(long = "list", help = "List incidents")]
        list: bool,

        #[arg(long = "open", help = "With --list: only unresolved incidents")]
        open: bool,

        #[arg(long = "update", value_name = "ID", requires = "status")]
        update: Option<i64>,

        #[arg(long = "status", help = "OPEN, INVESTIGATING or RESOLVED")]
        status: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the copy (zip on Windows, tar.gz elsewhere)")]
        compress: bool,
    },

    /// Export entries, timesheets or incidents
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, value_enum, default_value = "entries")]
        data: ExportData,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
