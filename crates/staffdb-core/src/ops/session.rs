use super::identity_map::IdentityMap;
use crate::model::{Department, Employee, Review};

/// Per-connection cache of live mapped objects
///
/// Replaces a process-wide registry: create one per connection lifetime and
/// pass it by `&mut` into mapper operations. Dropping it drops the cache.
#[derive(Debug, Default)]
pub struct Session {
    pub reviews: IdentityMap<Review>,
    pub employees: IdentityMap<Employee>,
    pub departments: IdentityMap<Department>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every cached object
    ///
    /// Handles already held by callers stay valid but are no longer tracked.
    pub fn clear(&mut self) {
        self.reviews.clear();
        self.employees.clear();
        self.departments.clear();
    }

    /// Total number of cached objects across all entities
    pub fn len(&self) -> usize {
        self.reviews.len() + self.employees.len() + self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DepartmentRow;
    use crate::ops::new_handle;

    #[test]
    fn test_clear_empties_every_map() {
        let mut session = Session::new();
        let row = DepartmentRow {
            id: 1,
            name: "Payroll".to_string(),
            location: "HQ".to_string(),
        };
        session
            .departments
            .insert(1, new_handle(Department::hydrate(&row).unwrap()));
        assert_eq!(session.len(), 1);

        session.clear();
        assert!(session.is_empty());
    }
}
