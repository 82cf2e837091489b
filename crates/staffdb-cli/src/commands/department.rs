//! Department commands
//!
//! Usage: staffdb department <add|list|show|delete>

use clap::{Args, Subcommand};
use rusqlite::Connection;
use staffdb_core::ops::Session;
use staffdb_store::DepartmentRepo;

use super::{boundary, print_all, print_one, CliResult};

#[derive(Debug, Args)]
pub struct DepartmentArgs {
    #[command(subcommand)]
    pub command: DepartmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum DepartmentCommand {
    /// Create a department
    Add {
        name: String,
        location: String,
    },
    /// List all departments
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one department by id
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Delete a department by id
    Delete { id: i64 },
}

/// Execute department command
pub fn execute(args: DepartmentArgs, conn: &Connection, session: &mut Session) -> CliResult {
    match args.command {
        DepartmentCommand::Add { name, location } => {
            let department = boundary("department_create", || {
                DepartmentRepo::create(conn, &mut session.departments, name, location)
            })?;
            println!("✓ Created {}", department.borrow());
        }
        DepartmentCommand::List { json } => {
            let all = boundary("department_list", || {
                DepartmentRepo::get_all(conn, &mut session.departments)
            })?;
            print_all(&all, json)?;
        }
        DepartmentCommand::Show { id, json } => {
            let found = boundary("department_get", || {
                DepartmentRepo::find_by_id(conn, &mut session.departments, id)
            })?;
            print_one(found.as_ref(), json, "Department", id)?;
        }
        DepartmentCommand::Delete { id } => {
            let deleted = boundary("department_delete", || {
                match DepartmentRepo::find_by_id(conn, &mut session.departments, id)? {
                    Some(department) => {
                        DepartmentRepo::delete(conn, &mut session.departments, &department)?;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            })?;
            if deleted {
                println!("✓ Deleted department {}", id);
            } else {
                println!("Department {} not found", id);
            }
        }
    }
    Ok(())
}
