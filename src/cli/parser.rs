use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for shiftlink
/// Time-and-attendance console: linked ENTRY/EXIT punches on SQLite
#[derive(Parser)]
#[command(
    name = "shiftlink",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record ENTRY/EXIT punches linked by a 6-digit code and reconcile them into shifts",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the operator stamped on new punches
    #[arg(global = true, long = "operator")]
    pub operator: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, help = "Only punches recorded at this site id")]
    pub site: Option<String>,

    #[arg(long, help = "Only punches recorded in this sector id")]
    pub sector: Option<String>,

    #[arg(long, help = "Only punches of this worker id")]
    pub worker: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "First local date included")]
    pub from: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Last local date included")]
    pub to: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
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

    /// Register and list workers
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Register sites, their sectors, and list them
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },

    /// Record an ENTRY punch and print its linking code
    Entry {
        #[arg(long, help = "Worker id")]
        worker: Option<String>,

        #[arg(long, help = "Site id")]
        site: Option<String>,

        #[arg(long, help = "Sector id")]
        sector: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Local date (default: today)")]
        date: Option<String>,

        #[arg(long, value_name = "HH:MM", help = "Local time (default: now)")]
        time: Option<String>,
    },

    /// Record the EXIT closing the entry that holds CODE
    Exit {
        #[arg(long, help = "Worker id")]
        worker: Option<String>,

        #[arg(long, help = "6-digit code printed at entry")]
        code: Option<String>,

        #[arg(long, help = "Site id")]
        site: Option<String>,

        #[arg(long, help = "Sector id")]
        sector: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Local date (default: today)")]
        date: Option<String>,

        #[arg(long, value_name = "HH:MM", help = "Local time (default: now)")]
        time: Option<String>,
    },

    /// Delete a shift by punch id (an entry takes its exits along)
    Del {
        /// Full punch id, or a unique prefix of at least 4 characters
        punch_id: String,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// List shifts
    List {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long = "events", help = "List raw punches instead of shifts")]
        events: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup without asking")]
        force: bool,
    },

    /// Export shifts (or raw punches with --events)
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, short = 'e')]
        events: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Register a worker (name is normalized to uppercase without accents)
    Add {
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        cpf: Option<String>,

        #[arg(long)]
        matricula: Option<String>,

        #[arg(long)]
        specialty: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long, help = "Register as inactive")]
        inactive: bool,
    },

    /// List workers, most recently updated first
    List {
        #[arg(long, help = "Case-insensitive search on name or matricula")]
        search: Option<String>,
    },

    /// Edit a registered worker; omitted fields keep their value
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        cpf: Option<String>,

        #[arg(long)]
        matricula: Option<String>,

        #[arg(long)]
        specialty: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Activate or deactivate a worker
    Status {
        id: String,

        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        #[arg(long)]
        inactive: bool,
    },

    /// Re-normalize every stored worker name
    Normalize,
}

#[derive(Subcommand)]
pub enum SiteAction {
    /// Register a site
    Add {
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        name: Option<String>,
    },

    /// Register a sector inside a site
    Sector {
        #[arg(long)]
        site: String,

        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        name: Option<String>,
    },

    /// List sites and their sectors
    List,
}
