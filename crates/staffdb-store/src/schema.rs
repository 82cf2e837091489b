//! Table lifecycle
//!
//! Idempotent DDL for the three mapped tables. Each statement runs in
//! autocommit mode, so it is committed as soon as it returns.

use crate::errors::{sqlite_error, Result};
use rusqlite::Connection;
use staffdb_core_types::schema::{TABLE_DEPARTMENTS, TABLE_EMPLOYEES, TABLE_REVIEWS};

pub const CREATE_DEPARTMENTS: &str = "CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY,
    name TEXT,
    location TEXT
)";

pub const CREATE_EMPLOYEES: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT,
    job_title TEXT,
    department_id INTEGER,
    FOREIGN KEY (department_id) REFERENCES departments(id)
)";

pub const CREATE_REVIEWS: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INT,
    summary TEXT,
    employee_id INTEGER,
    FOREIGN KEY (employee_id) REFERENCES employees(id)
)";

pub(crate) fn ensure_table(conn: &Connection, table: &'static str, ddl: &str) -> Result<()> {
    conn.execute(ddl, [])
        .map_err(sqlite_error("create_table", table))?;
    tracing::debug!(table, "table ensured");
    Ok(())
}

pub(crate) fn drop_table(conn: &Connection, table: &'static str) -> Result<()> {
    conn.execute(&format!("DROP TABLE IF EXISTS {}", table), [])
        .map_err(sqlite_error("drop_table", table))?;
    tracing::debug!(table, "table dropped");
    Ok(())
}

/// Create every table, parents before children
///
/// # Errors
/// `Persistence` if the statement fails.
pub fn create_all(conn: &Connection) -> Result<()> {
    ensure_table(conn, TABLE_DEPARTMENTS, CREATE_DEPARTMENTS)?;
    ensure_table(conn, TABLE_EMPLOYEES, CREATE_EMPLOYEES)?;
    ensure_table(conn, TABLE_REVIEWS, CREATE_REVIEWS)?;
    Ok(())
}

/// Drop every table, children before parents
///
/// # Errors
/// `Persistence` if the statement fails.
pub fn drop_all(conn: &Connection) -> Result<()> {
    drop_table(conn, TABLE_REVIEWS)?;
    drop_table(conn, TABLE_EMPLOYEES)?;
    drop_table(conn, TABLE_DEPARTMENTS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn test_create_all_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();
        create_all(&conn).unwrap();
        assert_eq!(table_names(&conn), vec!["departments", "employees", "reviews"]);
    }

    #[test]
    fn test_drop_all_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();
        drop_all(&conn).unwrap();
        drop_all(&conn).unwrap();
        assert!(table_names(&conn).is_empty());
    }
}
