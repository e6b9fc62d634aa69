//! declmap core - declarative mapping kernel
//!
//! This crate provides the in-memory half of the mapping workflow:
//! - Mapped entity definitions (`User`) with explicit table/column metadata
//! - An explicit schema registry of mapped tables
//! - The field-enumeration protocol and the generic structured serializer
//! - The structured error facility and the logging facility
//!
//! Persistence (engine, schema creation, unit of work) lives in `declmap-store`.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod registry;
pub mod serialize;

pub use declmap_core_types::schema;

// Re-export commonly used types
pub use errors::{DeclMapError, ExError, ExErrorKind, Result};
pub use model::{
    ColumnDef, ColumnType, FieldEnumeration, FieldValue, Mapped, Record, TableDef, User,
    UserFields,
};
pub use registry::SchemaRegistry;
pub use serialize::{to_json_string, to_structured};
