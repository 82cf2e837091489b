//! staffdb Store - SQLite persistence for the staffdb mappers
//!
//! Provides:
//! - Connection helpers (open, configure)
//! - Table lifecycle for departments, employees and reviews
//! - Mappers that pair the core models with parameterized CRUD SQL
//! - SQLite-backed lookups for foreign-key validation

pub mod db;
pub mod errors;
pub mod lookup;
pub mod repo;
pub mod schema;

// Re-export key types
pub use errors::Result;
pub use lookup::SqliteLookup;
pub use repo::{DepartmentRepo, EmployeeRepo, ReviewRepo};
