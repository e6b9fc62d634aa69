//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Mapping identifiers
pub const FIELD_TABLE: &str = "table";
pub const FIELD_ROW_ID: &str = "row_id";
pub const FIELD_FIELD: &str = "field";

// Unit of work counters
pub const FIELD_STAGED: &str = "staged";
pub const FIELD_DIRTY: &str = "dirty";
pub const FIELD_ROWS: &str = "rows";

// SQL echo
pub const FIELD_SQL: &str = "sql";
pub const SQL_TARGET: &str = "declmap::sql";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
