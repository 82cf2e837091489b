//! Review commands
//!
//! Usage: staffdb review <add|list|show|update|delete>

use clap::{Args, Subcommand};
use rusqlite::Connection;
use staffdb_core::ops::Session;
use staffdb_store::{ReviewRepo, SqliteLookup};

use super::{boundary, print_all, print_one, CliResult};

#[derive(Debug, Args)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub command: ReviewCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommand {
    /// File a review for an existing employee
    Add {
        year: i64,
        summary: String,
        #[arg(long)]
        employee: i64,
    },
    /// List all reviews, or those of one employee
    List {
        #[arg(long)]
        employee: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// Show one review by id
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
        /// Print the stored row without going through the identity map
        #[arg(long, conflicts_with = "json")]
        raw: bool,
    },
    /// Change fields of an existing review
    Update {
        id: i64,
        #[arg(long)]
        year: Option<i64>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        employee: Option<i64>,
    },
    /// Delete a review by id
    Delete { id: i64 },
}

/// Execute review command
pub fn execute(args: ReviewArgs, conn: &Connection, session: &mut Session) -> CliResult {
    match args.command {
        ReviewCommand::Add {
            year,
            summary,
            employee,
        } => {
            let review = boundary("review_create", || {
                ReviewRepo::create(conn, &mut session.reviews, year, summary, employee)
            })?;
            println!("✓ Created {}", review.borrow());
        }
        ReviewCommand::List { employee, json } => {
            let all = boundary("review_list", || match employee {
                Some(employee_id) => {
                    ReviewRepo::for_employee(conn, &mut session.reviews, employee_id)
                }
                None => ReviewRepo::get_all(conn, &mut session.reviews),
            })?;
            print_all(&all, json)?;
        }
        ReviewCommand::Show { id, json, raw } => {
            if raw {
                let row = boundary("review_get_row", || ReviewRepo::find_row_by_id(conn, id))?;
                match row {
                    Some(row) => println!(
                        "({}, {}, {:?}, {})",
                        row.id, row.year, row.summary, row.employee_id
                    ),
                    None => println!("Review {} not found", id),
                }
                return Ok(());
            }

            let found = boundary("review_get", || {
                ReviewRepo::find_by_id(conn, &mut session.reviews, id)
            })?;
            print_one(found.as_ref(), json, "Review", id)?;
        }
        ReviewCommand::Update {
            id,
            year,
            summary,
            employee,
        } => {
            let updated = boundary("review_update", || {
                let Some(review) = ReviewRepo::find_by_id(conn, &mut session.reviews, id)? else {
                    return Ok(None);
                };
                {
                    let mut current = review.borrow_mut();
                    if let Some(year) = year {
                        current.set_year(year)?;
                    }
                    if let Some(summary) = summary {
                        current.set_summary(summary)?;
                    }
                    if let Some(employee_id) = employee {
                        current.set_employee_id(employee_id, &SqliteLookup::new(conn))?;
                    }
                }
                ReviewRepo::update(conn, &review)?;
                Ok(Some(review))
            })?;
            match updated {
                Some(review) => println!("✓ Updated {}", review.borrow()),
                None => println!("Review {} not found", id),
            }
        }
        ReviewCommand::Delete { id } => {
            let deleted = boundary("review_delete", || {
                match ReviewRepo::find_by_id(conn, &mut session.reviews, id)? {
                    Some(review) => {
                        ReviewRepo::delete(conn, &mut session.reviews, &review)?;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            })?;
            if deleted {
                println!("✓ Deleted review {}", id);
            } else {
                println!("Review {} not found", id);
            }
        }
    }
    Ok(())
}
