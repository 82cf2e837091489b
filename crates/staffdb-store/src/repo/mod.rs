//! Mappers pairing the core models with their backing tables
//!
//! Every operation takes the connection explicitly and, where objects are
//! hydrated or registered, the identity map for its entity.

pub mod department_repo;
pub mod employee_repo;
pub mod review_repo;

pub use department_repo::DepartmentRepo;
pub use employee_repo::EmployeeRepo;
pub use review_repo::ReviewRepo;

use std::cell::{Ref, RefMut};

use staffdb_core::ops::Handle;

use crate::errors::{handle_busy, Result};

/// Borrow a mapped object for reading without panicking on conflicts
pub(crate) fn read<'h, T>(handle: &'h Handle<T>, op: &str, table: &str) -> Result<Ref<'h, T>> {
    handle.try_borrow().map_err(|_| handle_busy(op, table))
}

/// Borrow a mapped object for writing without panicking on conflicts
pub(crate) fn write<'h, T>(
    handle: &'h Handle<T>,
    op: &str,
    table: &str,
) -> Result<RefMut<'h, T>> {
    handle.try_borrow_mut().map_err(|_| handle_busy(op, table))
}
