use serde::Serialize;

use crate::errors::{ExError, Result, StaffError};
use crate::lookup::EmployeeLookup;
use crate::rules::validation::{validate_summary, validate_year};

/// Raw `reviews` row, in column order `(id, year, summary, employee_id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRow {
    pub id: i64,
    pub year: i64,
    pub summary: String,
    pub employee_id: i64,
}

/// Review - a yearly performance summary filed against one employee
///
/// Fields are private; every write goes through a validating setter. The id is
/// `None` while the review is transient or detached and is only assigned by the
/// mapper after a successful insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    id: Option<i64>,
    year: i64,
    summary: String,
    employee_id: i64,
}

impl Review {
    /// Build an unpersisted review
    ///
    /// # Errors
    /// * `InvalidYear` - year before 2000
    /// * `InvalidSummary` - empty summary
    /// * `DanglingReference` - no employee with `employee_id`
    /// * `Persistence` - the employee lookup itself failed
    pub fn new(
        year: i64,
        summary: impl Into<String>,
        employee_id: i64,
        employees: &dyn EmployeeLookup,
    ) -> std::result::Result<Self, ExError> {
        Self::with_id(None, year, summary, employee_id, employees)
    }

    /// Build a review with an explicit id, running the same validation as [`Review::new`]
    ///
    /// # Errors
    /// Same as [`Review::new`].
    pub fn with_id(
        id: Option<i64>,
        year: i64,
        summary: impl Into<String>,
        employee_id: i64,
        employees: &dyn EmployeeLookup,
    ) -> std::result::Result<Self, ExError> {
        let summary = summary.into();
        validate_year(year)?;
        validate_summary(&summary)?;
        ensure_employee(employee_id, employees)?;

        Ok(Self {
            id,
            year,
            summary,
            employee_id,
        })
    }

    /// Build a review from a stored row
    ///
    /// Year and summary are re-validated. The employee reference is trusted:
    /// the row already satisfied the table's foreign key when it was written.
    ///
    /// # Errors
    /// `InvalidYear` or `InvalidSummary` if the stored row is invalid.
    pub fn hydrate(row: &ReviewRow) -> Result<Self> {
        validate_year(row.year)?;
        validate_summary(&row.summary)?;
        Ok(Self {
            id: Some(row.id),
            year: row.year,
            summary: row.summary.clone(),
            employee_id: row.employee_id,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> i64 {
        self.employee_id
    }

    /// Check whether this review currently maps to a row
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Assign a new year
    ///
    /// # Errors
    /// `InvalidYear` if the year is before 2000; the review is left unchanged.
    pub fn set_year(&mut self, year: i64) -> Result<()> {
        validate_year(year)?;
        self.year = year;
        Ok(())
    }

    /// Assign a new summary
    ///
    /// # Errors
    /// `InvalidSummary` if the summary is empty; the review is left unchanged.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<()> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    /// Point the review at another employee
    ///
    /// Performs a lookup read before assigning.
    ///
    /// # Errors
    /// `DanglingReference` if no such employee exists, or the lookup's own error.
    pub fn set_employee_id(
        &mut self,
        employee_id: i64,
        employees: &dyn EmployeeLookup,
    ) -> std::result::Result<(), ExError> {
        ensure_employee(employee_id, employees)?;
        self.employee_id = employee_id;
        Ok(())
    }

    /// Overwrite every field from a stored row (identity-map refresh)
    ///
    /// All values are validated before any field changes.
    ///
    /// # Errors
    /// `InvalidYear` or `InvalidSummary`; nothing is overwritten.
    pub fn refresh_from(&mut self, row: &ReviewRow) -> Result<()> {
        validate_year(row.year)?;
        validate_summary(&row.summary)?;
        self.id = Some(row.id);
        self.year = row.year;
        self.summary = row.summary.clone();
        self.employee_id = row.employee_id;
        Ok(())
    }

    /// Record the primary key generated by an insert
    pub fn mark_persisted(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Forget the primary key after the row was deleted
    pub fn mark_detached(&mut self) {
        self.id = None;
    }
}

impl std::fmt::Display for Review {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "[{}] ", id)?,
            None => write!(f, "[unsaved] ")?,
        }
        write!(
            f,
            "{}: {}, Employee: {}",
            self.year, self.summary, self.employee_id
        )
    }
}

fn ensure_employee(
    employee_id: i64,
    employees: &dyn EmployeeLookup,
) -> std::result::Result<(), ExError> {
    if !employees.employee_exists(employee_id)? {
        return Err(StaffError::EmployeeNotFound { employee_id }.into());
    }
    Ok(())
}
