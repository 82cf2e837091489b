use serde::Serialize;

use crate::errors::{ExError, Result, StaffError};
use crate::lookup::DepartmentLookup;
use crate::rules::validation::{validate_job_title, validate_name};

/// Raw `employees` row, in column order `(id, name, job_title, department_id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: String,
    pub job_title: String,
    pub department_id: i64,
}

/// Employee - a person assigned to one department
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    id: Option<i64>,
    name: String,
    job_title: String,
    department_id: i64,
}

impl Employee {
    /// Build an unpersisted employee
    ///
    /// # Errors
    /// * `InvalidName` / `InvalidJobTitle` - empty strings
    /// * `DanglingReference` - no department with `department_id`
    pub fn new(
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
        departments: &dyn DepartmentLookup,
    ) -> std::result::Result<Self, ExError> {
        let name = name.into();
        let job_title = job_title.into();
        validate_name(&name)?;
        validate_job_title(&job_title)?;
        ensure_department(department_id, departments)?;

        Ok(Self {
            id: None,
            name,
            job_title,
            department_id,
        })
    }

    /// Build an employee from a stored row; the department reference is trusted
    ///
    /// # Errors
    /// `InvalidName` or `InvalidJobTitle` if the row holds an empty value.
    pub fn hydrate(row: &EmployeeRow) -> Result<Self> {
        validate_name(&row.name)?;
        validate_job_title(&row.job_title)?;
        Ok(Self {
            id: Some(row.id),
            name: row.name.clone(),
            job_title: row.job_title.clone(),
            department_id: row.department_id,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn department_id(&self) -> i64 {
        self.department_id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// # Errors
    /// `InvalidName` if the name is empty; the employee is left unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// # Errors
    /// `InvalidJobTitle` if the title is empty; the employee is left unchanged.
    pub fn set_job_title(&mut self, job_title: impl Into<String>) -> Result<()> {
        let job_title = job_title.into();
        validate_job_title(&job_title)?;
        self.job_title = job_title;
        Ok(())
    }

    /// Move the employee to another department, after a lookup read
    ///
    /// # Errors
    /// `DanglingReference` if no such department exists, or the lookup's own error.
    pub fn set_department_id(
        &mut self,
        department_id: i64,
        departments: &dyn DepartmentLookup,
    ) -> std::result::Result<(), ExError> {
        ensure_department(department_id, departments)?;
        self.department_id = department_id;
        Ok(())
    }

    /// Overwrite every field from a stored row
    ///
    /// # Errors
    /// `InvalidName` or `InvalidJobTitle`; nothing is overwritten.
    pub fn refresh_from(&mut self, row: &EmployeeRow) -> Result<()> {
        validate_name(&row.name)?;
        validate_job_title(&row.job_title)?;
        self.id = Some(row.id);
        self.name = row.name.clone();
        self.job_title = row.job_title.clone();
        self.department_id = row.department_id;
        Ok(())
    }

    pub fn mark_persisted(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn mark_detached(&mut self) {
        self.id = None;
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "[{}] ", id)?,
            None => write!(f, "[unsaved] ")?,
        }
        write!(
            f,
            "{}, {}, Department: {}",
            self.name, self.job_title, self.department_id
        )
    }
}

fn ensure_department(
    department_id: i64,
    departments: &dyn DepartmentLookup,
) -> std::result::Result<(), ExError> {
    if !departments.department_exists(department_id)? {
        return Err(StaffError::DepartmentNotFound { department_id }.into());
    }
    Ok(())
}
