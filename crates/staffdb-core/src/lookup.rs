//! Foreign-key lookup interfaces.
//!
//! Models validate references through these traits instead of touching the
//! database directly. The store crate implements them over a SQLite connection.

use std::collections::BTreeSet;

use crate::errors::ExError;

/// Employee lookup-by-id, used to validate `Review::employee_id`.
#[allow(clippy::result_large_err)]
pub trait EmployeeLookup {
    /// Report whether an employee row with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Persistence` if the backing read fails.
    fn employee_exists(&self, employee_id: i64) -> Result<bool, ExError>;
}

/// Department lookup-by-id, used to validate `Employee::department_id`.
#[allow(clippy::result_large_err)]
pub trait DepartmentLookup {
    /// Report whether a department row with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Persistence` if the backing read fails.
    fn department_exists(&self, department_id: i64) -> Result<bool, ExError>;
}

/// A fixed set of known ids; handy for exercising models without a database.
impl EmployeeLookup for BTreeSet<i64> {
    fn employee_exists(&self, employee_id: i64) -> Result<bool, ExError> {
        Ok(self.contains(&employee_id))
    }
}

impl DepartmentLookup for BTreeSet<i64> {
    fn department_exists(&self, department_id: i64) -> Result<bool, ExError> {
        Ok(self.contains(&department_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_lookup() {
        let known: BTreeSet<i64> = [1, 2].into_iter().collect();
        assert!(known.employee_exists(1).unwrap());
        assert!(!known.employee_exists(3).unwrap());
        assert!(known.department_exists(2).unwrap());
    }
}
