//! Employee commands
//!
//! Usage: staffdb employee <add|list|show|delete|reviews>

use clap::{Args, Subcommand};
use rusqlite::Connection;
use staffdb_core::ops::Session;
use staffdb_store::EmployeeRepo;

use super::{boundary, print_all, print_one, CliResult};

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    pub command: EmployeeCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Create an employee in an existing department
    Add {
        name: String,
        job_title: String,
        #[arg(long)]
        department: i64,
    },
    /// List all employees, or those of one department
    List {
        #[arg(long)]
        department: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// Show one employee by id
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Delete an employee by id
    Delete { id: i64 },
    /// List the reviews filed for an employee
    Reviews {
        id: i64,
        #[arg(long)]
        json: bool,
    },
}

/// Execute employee command
pub fn execute(args: EmployeeArgs, conn: &Connection, session: &mut Session) -> CliResult {
    match args.command {
        EmployeeCommand::Add {
            name,
            job_title,
            department,
        } => {
            let employee = boundary("employee_create", || {
                EmployeeRepo::create(conn, &mut session.employees, name, job_title, department)
            })?;
            println!("✓ Created {}", employee.borrow());
        }
        EmployeeCommand::List { department, json } => {
            let all = boundary("employee_list", || match department {
                Some(department_id) => {
                    EmployeeRepo::in_department(conn, &mut session.employees, department_id)
                }
                None => EmployeeRepo::get_all(conn, &mut session.employees),
            })?;
            print_all(&all, json)?;
        }
        EmployeeCommand::Show { id, json } => {
            let found = boundary("employee_get", || {
                EmployeeRepo::find_by_id(conn, &mut session.employees, id)
            })?;
            print_one(found.as_ref(), json, "Employee", id)?;
        }
        EmployeeCommand::Delete { id } => {
            let deleted = boundary("employee_delete", || {
                match EmployeeRepo::find_by_id(conn, &mut session.employees, id)? {
                    Some(employee) => {
                        EmployeeRepo::delete(conn, &mut session.employees, &employee)?;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            })?;
            if deleted {
                println!("✓ Deleted employee {}", id);
            } else {
                println!("Employee {} not found", id);
            }
        }
        EmployeeCommand::Reviews { id, json } => {
            let found = boundary("employee_reviews", || {
                match EmployeeRepo::find_by_id(conn, &mut session.employees, id)? {
                    Some(employee) => {
                        EmployeeRepo::reviews(conn, &mut session.reviews, &employee).map(Some)
                    }
                    None => Ok(None),
                }
            })?;
            match found {
                Some(all) => print_all(&all, json)?,
                None => println!("Employee {} not found", id),
            }
        }
    }
    Ok(())
}
