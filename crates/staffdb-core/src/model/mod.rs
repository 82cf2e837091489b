pub mod department;
pub mod employee;
pub mod review;

pub use department::{Department, DepartmentRow};
pub use employee::{Employee, EmployeeRow};
pub use review::{Review, ReviewRow};
