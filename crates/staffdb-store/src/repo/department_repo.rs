//! Department mapper

use rusqlite::{Connection, OptionalExtension, Row};
use staffdb_core::errors::{ExError, StaffError};
use staffdb_core::model::{Department, DepartmentRow, Employee};
use staffdb_core::ops::{new_handle, Handle, IdentityMap};
use staffdb_core_types::schema::TABLE_DEPARTMENTS;

use crate::errors::{sqlite_error, Result};
use crate::repo::{read, write, EmployeeRepo};
use crate::schema;

/// SQLite mapper for departments
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn create_table(conn: &Connection) -> Result<()> {
        schema::ensure_table(conn, TABLE_DEPARTMENTS, schema::CREATE_DEPARTMENTS)
    }

    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn drop_table(conn: &Connection) -> Result<()> {
        schema::drop_table(conn, TABLE_DEPARTMENTS)
    }

    /// # Errors
    /// * `AlreadyPersisted` - the object already has an id; nothing is inserted
    /// * `Internal` - the object is already borrowed; nothing is inserted
    /// * `Persistence` - the insert failed
    pub fn save(
        conn: &Connection,
        cache: &mut IdentityMap<Department>,
        department: &Handle<Department>,
    ) -> Result<i64> {
        let mut current = write(department, "save", TABLE_DEPARTMENTS)?;
        if let Some(id) = current.id() {
            return Err(StaffError::AlreadyPersisted {
                table: TABLE_DEPARTMENTS.to_string(),
                id,
            }
            .into());
        }

        conn.execute(
            "INSERT INTO departments (name, location) VALUES (?1, ?2)",
            rusqlite::params![current.name(), current.location()],
        )
        .map_err(sqlite_error("save", TABLE_DEPARTMENTS))?;
        let id = conn.last_insert_rowid();

        current.mark_persisted(id);
        cache.insert(id, department.clone());
        tracing::debug!(department_id = id, "department inserted");

        Ok(id)
    }

    /// # Errors
    /// Any validation error from the constructor, then the errors of `save`.
    pub fn create(
        conn: &Connection,
        cache: &mut IdentityMap<Department>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Handle<Department>> {
        let handle = new_handle(Department::new(name, location)?);
        Self::save(conn, cache, &handle)?;
        Ok(handle)
    }

    /// # Errors
    /// A validation error if the row holds invalid values, or `Internal` if
    /// the cached object is already borrowed.
    pub fn instance_from_db(
        cache: &mut IdentityMap<Department>,
        row: &DepartmentRow,
    ) -> Result<Handle<Department>> {
        if let Some(handle) = cache.get(row.id) {
            write(&handle, "instance_from_db", TABLE_DEPARTMENTS)?.refresh_from(row)?;
            return Ok(handle);
        }

        let handle = new_handle(Department::hydrate(row)?);
        cache.insert(row.id, handle.clone());
        Ok(handle)
    }

    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn find_row_by_id(conn: &Connection, id: i64) -> Result<Option<DepartmentRow>> {
        conn.query_row(
            "SELECT id, name, location FROM departments WHERE id = ?1",
            [id],
            department_row,
        )
        .optional()
        .map_err(sqlite_error("find_by_id", TABLE_DEPARTMENTS))
    }

    /// # Errors
    /// `Persistence` if the statement fails. Validation errors as for
    /// `instance_from_db`.
    pub fn find_by_id(
        conn: &Connection,
        cache: &mut IdentityMap<Department>,
        id: i64,
    ) -> Result<Option<Handle<Department>>> {
        Self::find_row_by_id(conn, id)?
            .map(|row| Self::instance_from_db(cache, &row))
            .transpose()
    }

    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn find_by_name(
        conn: &Connection,
        cache: &mut IdentityMap<Department>,
        name: &str,
    ) -> Result<Option<Handle<Department>>> {
        let row = conn
            .query_row(
                "SELECT id, name, location FROM departments WHERE name = ?1",
                [name],
                department_row,
            )
            .optional()
            .map_err(sqlite_error("find_by_name", TABLE_DEPARTMENTS))?;
        row.map(|row| Self::instance_from_db(cache, &row))
            .transpose()
    }

    /// # Errors
    /// * `NotPersisted` - the object has no id
    /// * `Persistence` - the update failed
    pub fn update(conn: &Connection, department: &Handle<Department>) -> Result<()> {
        let current = read(department, "update", TABLE_DEPARTMENTS)?;
        let id = current.id().ok_or_else(|| {
            ExError::from(StaffError::NotPersisted {
                table: TABLE_DEPARTMENTS.to_string(),
            })
            .with_op("update")
        })?;

        conn.execute(
            "UPDATE departments SET name = ?1, location = ?2 WHERE id = ?3",
            rusqlite::params![current.name(), current.location(), id],
        )
        .map_err(sqlite_error("update", TABLE_DEPARTMENTS))?;

        Ok(())
    }

    /// # Errors
    /// * `Internal` - the object is already borrowed; nothing is deleted
    /// * `Persistence` - the delete failed (e.g. rows still reference it)
    pub fn delete(
        conn: &Connection,
        cache: &mut IdentityMap<Department>,
        department: &Handle<Department>,
    ) -> Result<()> {
        let mut current = write(department, "delete", TABLE_DEPARTMENTS)?;
        let Some(id) = current.id() else {
            return Ok(());
        };

        conn.execute("DELETE FROM departments WHERE id = ?1", [id])
            .map_err(sqlite_error("delete", TABLE_DEPARTMENTS))?;

        cache.remove(id);
        current.mark_detached();
        tracing::debug!(department_id = id, "department deleted");

        Ok(())
    }

    /// # Errors
    /// `Persistence` if the statement fails. Validation errors as for
    /// `instance_from_db`.
    pub fn get_all(
        conn: &Connection,
        cache: &mut IdentityMap<Department>,
    ) -> Result<Vec<Handle<Department>>> {
        let mut stmt = conn
            .prepare("SELECT id, name, location FROM departments")
            .map_err(sqlite_error("get_all", TABLE_DEPARTMENTS))?;
        let rows = stmt
            .query_map([], department_row)
            .map_err(sqlite_error("get_all", TABLE_DEPARTMENTS))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(sqlite_error("get_all", TABLE_DEPARTMENTS))?;

        rows.iter()
            .map(|row| Self::instance_from_db(cache, row))
            .collect()
    }

    /// Employees assigned to this department
    ///
    /// # Errors
    /// `NotPersisted` if the department has no id.
    pub fn employees(
        conn: &Connection,
        employees: &mut IdentityMap<Employee>,
        department: &Handle<Department>,
    ) -> Result<Vec<Handle<Employee>>> {
        let id = read(department, "employees", TABLE_DEPARTMENTS)?.id();
        let id = id.ok_or_else(|| {
            ExError::from(StaffError::NotPersisted {
                table: TABLE_DEPARTMENTS.to_string(),
            })
            .with_op("employees")
        })?;
        EmployeeRepo::in_department(conn, employees, id)
    }
}

fn department_row(row: &Row<'_>) -> rusqlite::Result<DepartmentRow> {
    Ok(DepartmentRow {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
    })
}
