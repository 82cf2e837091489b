//! SQLite-backed foreign-key lookups.

use rusqlite::{Connection, OptionalExtension};
use staffdb_core::errors::ExError;
use staffdb_core::lookup::{DepartmentLookup, EmployeeLookup};
use staffdb_core_types::schema::{TABLE_DEPARTMENTS, TABLE_EMPLOYEES};

use crate::errors::sqlite_error;

/// Existence checks against the live tables.
///
/// Every call is a database read; validation in the models is a side effect
/// of assignment.
pub struct SqliteLookup<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteLookup<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeLookup for SqliteLookup<'_> {
    fn employee_exists(&self, employee_id: i64) -> Result<bool, ExError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM employees WHERE id = ?1",
                [employee_id],
                |_| Ok(()),
            )
            .optional()
            .map_err(sqlite_error("employee_exists", TABLE_EMPLOYEES))?;
        Ok(found.is_some())
    }
}

impl DepartmentLookup for SqliteLookup<'_> {
    fn department_exists(&self, department_id: i64) -> Result<bool, ExError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM departments WHERE id = ?1",
                [department_id],
                |_| Ok(()),
            )
            .optional()
            .map_err(sqlite_error("department_exists", TABLE_DEPARTMENTS))?;
        Ok(found.is_some())
    }
}
