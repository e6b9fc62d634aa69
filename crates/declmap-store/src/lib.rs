//! declmap store - ephemeral SQLite backend and unit of work
//!
//! Provides:
//! - `Engine`: an in-memory SQLite connection with optional SQL echo
//! - Schema creation from a `SchemaRegistry`, with a checksummed ledger
//! - `SqliteRepo`: row-level insert/update/read of mapped entities
//! - `UnitOfWork`: staging, change tracking and transactional commit

pub mod config;
pub mod db;
pub mod engine;
pub mod errors;
pub mod repo;
pub mod schema;
pub mod session;

// Re-export key types
pub use config::EngineConfig;
pub use engine::Engine;
pub use errors::Result;
pub use session::{RecordHandle, RecordState, UnitOfWork};
