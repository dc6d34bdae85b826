use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for eldlog
/// CLI application to track duty status and HOS compliance with SQLite
#[derive(Parser)]
#[command(
    name = "eldlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track commercial driver duty status and enforce FMCSA hours-of-service limits using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing configuration fields with defaults")]
        migrate: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity and re-scan violations")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Add or list drivers
    Driver {
        #[arg(long = "add", help = "Register a new driver")]
        add: bool,

        #[arg(long = "name", help = "Driver full name (with --add)")]
        name: Option<String>,

        #[arg(long = "license", help = "License number, must be unique (with --add)")]
        license: Option<String>,

        #[arg(long = "list", help = "List registered drivers")]
        list: bool,
    },

    /// Record a duty-status change for a driver
    Duty {
        /// Driver id, license number or name
        driver: String,

        /// New duty status: OFF, SB, DR or ON
        status: String,

        #[arg(long = "location", help = "Location of the status change")]
        location: Option<String>,

        #[arg(long = "odometer", help = "Odometer reading, miles")]
        odometer: Option<i64>,

        #[arg(long = "remarks", help = "Free-form remarks")]
        remarks: Option<String>,

        #[arg(
            long = "at",
            help = "Timestamp of the change (YYYY-MM-DD HH:MM), default now"
        )]
        at: Option<String>,
    },

    /// Show a driver's current hours-of-service status
    Status {
        /// Driver id, license number or name
        driver: String,

        #[arg(long = "json", help = "Print the status as JSON")]
        json: bool,
    },

    /// List a driver's duty-status logbook
    Logbook {
        /// Driver id, license number or name
        driver: String,

        #[arg(long = "days", default_value_t = 8, help = "How many days back to list")]
        days: i64,
    },

    /// List recorded HOS violations
    Violations {
        /// Driver id, license number or name
        driver: String,

        #[arg(long = "days", help = "Only violations from the last N days")]
        days: Option<i64>,
    },

    /// Check trip feasibility and place mandatory rest stops
    Plan {
        /// Driver id, license number or name
        driver: String,

        #[arg(long = "from", help = "Current location")]
        from: String,

        #[arg(long = "pickup", help = "Pickup location")]
        pickup: String,

        #[arg(long = "dropoff", help = "Dropoff location")]
        dropoff: String,

        #[arg(long = "hours", help = "Estimated driving hours for the trip")]
        hours: f64,

        #[arg(long = "json", help = "Print the full plan as JSON")]
        json: bool,
    },

    /// Print the hours-of-service rule constants
    Rules,

    /// Export a driver's duty events
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "driver", help = "Driver id, license number or name")]
        driver: String,

        #[arg(long = "days", help = "Only events from the last N days")]
        days: Option<i64>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Print rows from the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
