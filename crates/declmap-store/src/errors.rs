//! Error handling for declmap-store
//!
//! Wraps declmap-core ExError with store-specific helpers

use declmap_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a backend-unavailable error
pub fn backend_unavailable(op: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::BackendUnavailable)
        .with_op(op.to_string())
        .with_message(reason)
}

/// Create a schema creation error for one table
pub fn schema_error(table: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::BackendUnavailable)
        .with_op("create_all")
        .with_entity(table.to_string())
        .with_message(format!("Creating table {} failed: {}", table, reason))
}

/// Create a checksum mismatch error for a table already in the ledger
pub fn checksum_mismatch(table: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::BackendUnavailable)
        .with_op("create_all")
        .with_entity(table.to_string())
        .with_message(format!(
            "Table {} already created with a different definition: expected checksum {}, got {}",
            table, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}
