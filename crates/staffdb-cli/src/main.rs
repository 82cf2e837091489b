//! staffdb CLI
//!
//! Command-line interface for the department, employee and review mappers

use clap::{Parser, Subcommand, ValueEnum};
use staffdb_core::logging_facility::{self, Profile};
use staffdb_core::ops::Session;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "staffdb")]
#[command(about = "staffdb - departments, employees and their reviews", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "STAFFDB_PATH", default_value = ".staffdb/store.db")]
    db: PathBuf,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create all tables
    Init,
    /// Drop all tables
    Reset,
    /// Department operations
    Department(commands::department::DepartmentArgs),
    /// Employee operations
    Employee(commands::employee::EmployeeArgs),
    /// Review operations
    Review(commands::review::ReviewArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let conn = staffdb_store::db::open(&cli.db)?;
    staffdb_store::db::configure(&conn)?;
    let mut session = Session::new();

    match cli.command {
        Commands::Init => commands::schema::init(&conn),
        Commands::Reset => commands::schema::reset(&conn),
        Commands::Department(args) => commands::department::execute(args, &conn, &mut session),
        Commands::Employee(args) => commands::employee::execute(args, &conn, &mut session),
        Commands::Review(args) => commands::review::execute(args, &conn, &mut session),
    }
}
