//! Schema creation
//!
//! Provides:
//! - DDL generation from mapped table definitions
//! - `create_all` with checksums and idempotent application
//! - An in-memory ledger of created tables, scoped to one engine

mod checksums;
mod ddl;
mod ledger;
mod runner;

pub use ledger::{AppliedTable, SchemaLedger};
pub use runner::create_all;
