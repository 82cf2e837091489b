//! Command handlers
//!
//! Handlers own lifecycle logging for every mapper call they make:
//! `log_op_start!` at entry, then `log_op_end!` or `log_op_error!`.
//! The store layer below only emits `tracing::debug!` details.

pub mod department;
pub mod employee;
pub mod review;
pub mod schema;

use serde::Serialize;
use staffdb_core::ops::Handle;
use staffdb_core::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Run one mapper operation inside start/end boundary events
pub(crate) fn boundary<T>(
    op: &'static str,
    f: impl FnOnce() -> staffdb_store::Result<T>,
) -> staffdb_store::Result<T> {
    log_op_start!(op);
    let start = Instant::now();

    match f() {
        Ok(value) => {
            log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
            Ok(value)
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
            Err(e)
        }
    }
}

/// Print mapped objects, one `Display` line each or a JSON array
pub(crate) fn print_all<T>(items: &[Handle<T>], json: bool) -> CliResult
where
    T: Serialize + std::fmt::Display + Clone,
{
    if json {
        let values: Vec<T> = items.iter().map(|h| h.borrow().clone()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for item in items {
            println!("{}", item.borrow());
        }
    }
    Ok(())
}

/// Print one mapped object or a not-found line
pub(crate) fn print_one<T>(item: Option<&Handle<T>>, json: bool, what: &str, id: i64) -> CliResult
where
    T: Serialize + std::fmt::Display,
{
    match item {
        Some(handle) if json => println!("{}", serde_json::to_string_pretty(&*handle.borrow())?),
        Some(handle) => println!("{}", handle.borrow()),
        None => println!("{} {} not found", what, id),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use staffdb_core::logging_facility::init_test_capture;
    use staffdb_core::ops::IdentityMap;
    use staffdb_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
    use staffdb_store::ReviewRepo;

    fn seeded_db() -> Connection {
        let conn = staffdb_store::db::open_in_memory().unwrap();
        staffdb_store::db::configure(&conn).unwrap();
        staffdb_store::schema::create_all(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO departments (id, name, location) VALUES (1, 'Payroll', 'HQ');
             INSERT INTO employees (id, name, job_title, department_id)
             VALUES (1, 'Lee', 'Manager', 1);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_boundary_logs_end_error_for_rejected_review() {
        // Given: a capture and a database with employee 1
        let capture = init_test_capture();
        let conn = seeded_db();
        let mut reviews = IdentityMap::new();

        // When: a review for 1999 is created inside the boundary
        let result = boundary("review_create", || {
            ReviewRepo::create(&conn, &mut reviews, 1999, "Too early", 1)
        });

        // Then: one start and one end_error event, carrying the error code
        assert!(result.is_err());
        assert_eq!(capture.lifecycle("review_create"), [EVENT_START, EVENT_END_ERROR]);
        let failed = capture.find("review_create", EVENT_END_ERROR).unwrap();
        assert_eq!(failed.err_code(), Some("ERR_INVALID_YEAR"));
        assert!(failed.duration_ms().is_some());
    }

    #[test]
    fn test_boundary_logs_end_with_duration_on_success() {
        // Given: a capture and a database with employee 1
        let capture = init_test_capture();
        let conn = seeded_db();
        let mut reviews = IdentityMap::new();

        // When: a valid review is created inside the boundary
        let review = boundary("review_create", || {
            ReviewRepo::create(&conn, &mut reviews, 2023, "Good performance", 1)
        })
        .unwrap();

        // Then: start then end, the end event timed and error-free
        assert_eq!(review.borrow().id(), Some(1));
        assert_eq!(capture.lifecycle("review_create"), [EVENT_START, EVENT_END]);
        let end = capture.find("review_create", EVENT_END).unwrap();
        assert!(end.duration_ms().is_some());
        assert_eq!(end.err_code(), None);
        assert!(end.component().unwrap().starts_with("staffdb::commands"));
    }
}
