#![allow(clippy::unwrap_used, clippy::expect_used)]

use staffdb_core::errors::{ExError, ExErrorKind, StaffError};
use staffdb_core::logging_facility::test_capture::init_test_capture;
use staffdb_core::{log_op_end, log_op_error, log_op_start};
use staffdb_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT, FIELD_REVIEW_ID, FIELD_TABLE,
};

#[test]
fn test_log_op_start_macro() {
    // Given: a capture on this thread
    let capture = init_test_capture();

    // When: a start event is emitted
    log_op_start!("review_create");

    // Then: it carries the op, the marker and the emitting module
    let start = capture.find("review_create", EVENT_START).unwrap();
    assert_eq!(start.component(), Some(module_path!()));
    assert!(start.field(FIELD_COMPONENT).is_some());
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();

    log_op_end!("review_update", duration_ms = 42u64);

    let end = capture.find("review_update", EVENT_END).unwrap();
    assert_eq!(end.duration_ms(), Some(42));
    assert_eq!(capture.lifecycle("review_update"), [EVENT_END]);
}

#[test]
fn test_log_op_error_includes_code_and_kind() {
    let capture = init_test_capture();

    log_op_error!(
        "review_create",
        StaffError::InvalidYear { year: 1999 },
        duration_ms = 10u64
    );

    let failed = capture.find("review_create", EVENT_END_ERROR).unwrap();
    assert_eq!(failed.err_code(), Some("ERR_INVALID_YEAR"));
    assert_eq!(failed.err_kind(), Some("InvalidYear"));
    assert_eq!(failed.level, tracing::Level::ERROR);
}

#[test]
fn test_log_op_error_accepts_ex_error_with_extra_fields() {
    let capture = init_test_capture();

    let err = ExError::new(ExErrorKind::Persistence).with_message("database is locked");
    log_op_error!("employee_delete", err, duration_ms = 1u64, table = "employees");

    let failed = capture.find("employee_delete", EVENT_END_ERROR).unwrap();
    assert_eq!(failed.err_code(), Some("ERR_PERSISTENCE"));
    assert_eq!(failed.field(FIELD_TABLE), Some("employees"));
}

#[test]
fn test_boundary_pair_keeps_entity_fields() {
    let capture = init_test_capture();

    log_op_start!("review_get", review_id = 7i64);
    log_op_end!("review_get", duration_ms = 3u64, review_id = 7i64);

    assert_eq!(capture.lifecycle("review_get"), [EVENT_START, EVENT_END]);
    for event in capture.events_for_op("review_get") {
        assert_eq!(event.field(FIELD_REVIEW_ID), Some("7"));
    }
}

#[test]
fn test_ops_are_kept_apart() {
    let capture = init_test_capture();

    log_op_start!("department_list");
    log_op_start!("employee_list");
    log_op_end!("department_list", duration_ms = 10u64);

    assert_eq!(capture.lifecycle("department_list"), [EVENT_START, EVENT_END]);
    assert_eq!(capture.lifecycle("employee_list"), [EVENT_START]);
    assert_eq!(capture.events().len(), 3);
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_missing_event() {
    let capture = init_test_capture();
    log_op_start!("review_delete");
    capture.assert_event_exists("review_delete", EVENT_END);
}
