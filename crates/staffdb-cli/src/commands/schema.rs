//! Table lifecycle commands
//!
//! Usage: staffdb init | staffdb reset

use rusqlite::Connection;

use super::{boundary, CliResult};

/// Create departments, employees and reviews
pub fn init(conn: &Connection) -> CliResult {
    boundary("schema_init", || staffdb_store::schema::create_all(conn))?;
    println!("✓ Tables ready");
    Ok(())
}

/// Drop reviews, employees and departments
pub fn reset(conn: &Connection) -> CliResult {
    boundary("schema_reset", || staffdb_store::schema::drop_all(conn))?;
    println!("✓ Tables dropped");
    Ok(())
}
