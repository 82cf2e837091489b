//! Employee mapper
//!
//! Same operation set as the review mapper, plus name lookup and the
//! employee -> reviews association.

use rusqlite::{Connection, OptionalExtension, Row};
use staffdb_core::errors::{ExError, StaffError};
use staffdb_core::model::{Employee, EmployeeRow, Review};
use staffdb_core::ops::{new_handle, Handle, IdentityMap};
use staffdb_core_types::schema::TABLE_EMPLOYEES;

use crate::errors::{sqlite_error, Result};
use crate::lookup::SqliteLookup;
use crate::repo::{read, write, ReviewRepo};
use crate::schema;

/// SQLite mapper for employees
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn create_table(conn: &Connection) -> Result<()> {
        schema::ensure_table(conn, TABLE_EMPLOYEES, schema::CREATE_EMPLOYEES)
    }

    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn drop_table(conn: &Connection) -> Result<()> {
        schema::drop_table(conn, TABLE_EMPLOYEES)
    }

    /// Insert a transient employee and register it in the identity map
    ///
    /// # Errors
    /// * `AlreadyPersisted` - the employee already has an id
    /// * `Internal` - the object is already borrowed; nothing is inserted
    /// * `Persistence` - the insert failed
    pub fn save(
        conn: &Connection,
        cache: &mut IdentityMap<Employee>,
        employee: &Handle<Employee>,
    ) -> Result<i64> {
        let mut current = write(employee, "save", TABLE_EMPLOYEES)?;
        if let Some(id) = current.id() {
            return Err(StaffError::AlreadyPersisted {
                table: TABLE_EMPLOYEES.to_string(),
                id,
            }
            .into());
        }

        conn.execute(
            "INSERT INTO employees (name, job_title, department_id) VALUES (?1, ?2, ?3)",
            rusqlite::params![current.name(), current.job_title(), current.department_id()],
        )
        .map_err(sqlite_error("save", TABLE_EMPLOYEES))?;
        let id = conn.last_insert_rowid();

        current.mark_persisted(id);
        cache.insert(id, employee.clone());
        tracing::debug!(employee_id = id, "employee inserted");

        Ok(id)
    }

    /// Validate, construct and save an employee in one step
    ///
    /// # Errors
    /// Any validation error from the constructor, then the errors of `save`.
    pub fn create(
        conn: &Connection,
        cache: &mut IdentityMap<Employee>,
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
    ) -> Result<Handle<Employee>> {
        let employee = Employee::new(name, job_title, department_id, &SqliteLookup::new(conn))?;
        let handle = new_handle(employee);
        Self::save(conn, cache, &handle)?;
        Ok(handle)
    }

    /// Find-or-update hydration keyed by the row's `id` column
    ///
    /// # Errors
    /// A validation error if the row holds invalid values, or `Internal` if
    /// the cached object is already borrowed.
    pub fn instance_from_db(
        cache: &mut IdentityMap<Employee>,
        row: &EmployeeRow,
    ) -> Result<Handle<Employee>> {
        if let Some(handle) = cache.get(row.id) {
            write(&handle, "instance_from_db", TABLE_EMPLOYEES)?.refresh_from(row)?;
            return Ok(handle);
        }

        let handle = new_handle(Employee::hydrate(row)?);
        cache.insert(row.id, handle.clone());
        Ok(handle)
    }

    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn find_row_by_id(conn: &Connection, id: i64) -> Result<Option<EmployeeRow>> {
        conn.query_row(
            "SELECT id, name, job_title, department_id FROM employees WHERE id = ?1",
            [id],
            employee_row,
        )
        .optional()
        .map_err(sqlite_error("find_by_id", TABLE_EMPLOYEES))
    }

    /// # Errors
    /// `Persistence` if the statement fails. Validation errors as for
    /// `instance_from_db`.
    pub fn find_by_id(
        conn: &Connection,
        cache: &mut IdentityMap<Employee>,
        id: i64,
    ) -> Result<Option<Handle<Employee>>> {
        Self::find_row_by_id(conn, id)?
            .map(|row| Self::instance_from_db(cache, &row))
            .transpose()
    }

    /// First employee with an exactly matching name
    ///
    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn find_by_name(
        conn: &Connection,
        cache: &mut IdentityMap<Employee>,
        name: &str,
    ) -> Result<Option<Handle<Employee>>> {
        let row = conn
            .query_row(
                "SELECT id, name, job_title, department_id FROM employees WHERE name = ?1",
                [name],
                employee_row,
            )
            .optional()
            .map_err(sqlite_error("find_by_name", TABLE_EMPLOYEES))?;
        row.map(|row| Self::instance_from_db(cache, &row))
            .transpose()
    }

    /// Write the employee's current fields to its row
    ///
    /// # Errors
    /// * `NotPersisted` - the object has no id
    /// * `Persistence` - the update failed
    pub fn update(conn: &Connection, employee: &Handle<Employee>) -> Result<()> {
        let current = read(employee, "update", TABLE_EMPLOYEES)?;
        let id = current.id().ok_or_else(|| {
            ExError::from(StaffError::NotPersisted {
                table: TABLE_EMPLOYEES.to_string(),
            })
            .with_op("update")
        })?;

        conn.execute(
            "UPDATE employees SET name = ?1, job_title = ?2, department_id = ?3 WHERE id = ?4",
            rusqlite::params![current.name(), current.job_title(), current.department_id(), id],
        )
        .map_err(sqlite_error("update", TABLE_EMPLOYEES))?;

        Ok(())
    }

    /// Delete the employee's row and detach the object
    ///
    /// Fails with `Persistence` while reviews still reference the employee and
    /// foreign keys are enforced.
    ///
    /// # Errors
    /// * `Internal` - the object is already borrowed; nothing is deleted
    /// * `Persistence` - the delete failed (e.g. rows still reference it)
    pub fn delete(
        conn: &Connection,
        cache: &mut IdentityMap<Employee>,
        employee: &Handle<Employee>,
    ) -> Result<()> {
        let mut current = write(employee, "delete", TABLE_EMPLOYEES)?;
        let Some(id) = current.id() else {
            return Ok(());
        };

        conn.execute("DELETE FROM employees WHERE id = ?1", [id])
            .map_err(sqlite_error("delete", TABLE_EMPLOYEES))?;

        cache.remove(id);
        current.mark_detached();
        tracing::debug!(employee_id = id, "employee deleted");

        Ok(())
    }

    /// # Errors
    /// `Persistence` if the statement fails. Validation errors as for
    /// `instance_from_db`.
    pub fn get_all(
        conn: &Connection,
        cache: &mut IdentityMap<Employee>,
    ) -> Result<Vec<Handle<Employee>>> {
        let rows = query_rows(
            conn,
            "get_all",
            "SELECT id, name, job_title, department_id FROM employees",
            [],
        )?;
        rows.iter()
            .map(|row| Self::instance_from_db(cache, row))
            .collect()
    }

    /// Employees belonging to one department
    ///
    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn in_department(
        conn: &Connection,
        cache: &mut IdentityMap<Employee>,
        department_id: i64,
    ) -> Result<Vec<Handle<Employee>>> {
        let rows = query_rows(
            conn,
            "in_department",
            "SELECT id, name, job_title, department_id FROM employees WHERE department_id = ?1",
            [department_id],
        )?;
        rows.iter()
            .map(|row| Self::instance_from_db(cache, row))
            .collect()
    }

    /// Reviews filed against this employee
    ///
    /// # Errors
    /// `NotPersisted` if the employee has no id.
    pub fn reviews(
        conn: &Connection,
        reviews: &mut IdentityMap<Review>,
        employee: &Handle<Employee>,
    ) -> Result<Vec<Handle<Review>>> {
        let id = read(employee, "reviews", TABLE_EMPLOYEES)?.id();
        let id = id.ok_or_else(|| {
            ExError::from(StaffError::NotPersisted {
                table: TABLE_EMPLOYEES.to_string(),
            })
            .with_op("reviews")
        })?;
        ReviewRepo::for_employee(conn, reviews, id)
    }
}

fn employee_row(row: &Row<'_>) -> rusqlite::Result<EmployeeRow> {
    Ok(EmployeeRow {
        id: row.get(0)?,
        name: row.get(1)?,
        job_title: row.get(2)?,
        department_id: row.get(3)?,
    })
}

fn query_rows<P: rusqlite::Params>(
    conn: &Connection,
    op: &'static str,
    sql: &str,
    params: P,
) -> Result<Vec<EmployeeRow>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(sqlite_error(op, TABLE_EMPLOYEES))?;
    let rows = stmt
        .query_map(params, employee_row)
        .map_err(sqlite_error(op, TABLE_EMPLOYEES))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sqlite_error(op, TABLE_EMPLOYEES))?;
    Ok(rows)
}
