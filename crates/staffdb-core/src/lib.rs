//! staffdb Core - domain models and in-memory mapping kernel
//!
//! This crate provides the storage-agnostic half of the staffdb mappers:
//! - Department, Employee and Review models with validated setters
//! - Validation rules shared by constructors and setters
//! - Session-scoped identity maps keyed by primary key
//! - Lookup traits used for foreign-key existence checks
//! - The canonical error and logging facilities

pub mod errors;
pub mod logging_facility;
pub mod lookup;
pub mod model;
pub mod ops;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, StaffError};
pub use lookup::{DepartmentLookup, EmployeeLookup};
pub use model::{Department, Employee, Review};
pub use ops::{Handle, IdentityMap, Session};
