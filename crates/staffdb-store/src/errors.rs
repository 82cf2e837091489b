//! Error handling for staffdb-store
//!
//! Wraps staffdb-core ExError with store-specific helpers

use staffdb_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Like [`from_rusqlite`], tagged with the mapper operation and table
pub fn sqlite_error(op: &'static str, table: &'static str) -> impl Fn(rusqlite::Error) -> ExError {
    move |err| {
        ExError::new(ExErrorKind::Persistence)
            .with_op(op)
            .with_entity(table)
            .with_message(err.to_string())
    }
}

/// Create an error for a handle that is already borrowed elsewhere
pub fn handle_busy(op: &str, table: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op.to_string())
        .with_entity(table.to_string())
        .with_message("mapped object is already borrowed")
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_error_carries_context() {
        let err = sqlite_error("save", "reviews")(rusqlite::Error::InvalidQuery);
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.op(), Some("save"));
        assert_eq!(err.entity(), Some("reviews"));
    }
}
