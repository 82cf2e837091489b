//! Canonical schema constants for structured logging and events
//!
//! These constants keep log field names consistent across the mappers and the CLI.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_TABLE: &str = "table";
pub const FIELD_REVIEW_ID: &str = "review_id";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Table names
pub const TABLE_DEPARTMENTS: &str = "departments";
pub const TABLE_EMPLOYEES: &str = "employees";
pub const TABLE_REVIEWS: &str = "reviews";
