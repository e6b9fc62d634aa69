//! Repository layer for persisting mapped entities to SQLite
//!
//! Bridges in-memory entities and their table rows

pub mod sqlite_repo;
mod values;

pub use sqlite_repo::SqliteRepo;
