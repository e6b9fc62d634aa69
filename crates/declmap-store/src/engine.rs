//! Storage engine
//!
//! An `Engine` owns one ephemeral SQLite connection plus the ledger of tables
//! created on it. Everything it holds is released when it is dropped.

use std::time::Instant;

use declmap_core::{log_op_end, log_op_error, log_op_start, Mapped, SchemaRegistry};
use rusqlite::Connection;

use crate::config::EngineConfig;
use crate::db;
use crate::errors::{from_rusqlite, Result};
use crate::schema::{self, AppliedTable, SchemaLedger};
use crate::session::UnitOfWork;

/// Ephemeral relational store
#[derive(Debug)]
pub struct Engine {
    conn: Connection,
    ledger: SchemaLedger,
}

impl Engine {
    /// Open a fresh in-memory database
    ///
    /// # Errors
    ///
    /// Returns `BackendUnavailable` if the URL is not an in-memory URL or the
    /// connection cannot be opened.
    pub fn connect(config: EngineConfig) -> Result<Self> {
        log_op_start!("connect", url = %config.url, echo = config.echo);
        let start = Instant::now();

        let engine = Self::connect_impl(config).map_err(|e| {
            log_op_error!(
                "connect",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "connect",
            duration_ms = start.elapsed().as_millis() as u64
        );
        Ok(engine)
    }

    fn connect_impl(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            conn: db::open(&config)?,
            ledger: SchemaLedger::default(),
        })
    }

    /// Open a fresh in-memory database with default settings
    ///
    /// # Errors
    ///
    /// Same as [`Engine::connect`].
    pub fn in_memory() -> Result<Self> {
        Self::connect(EngineConfig::default())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Create the tables of every registered entity
    ///
    /// Returns the number of tables created; tables already created on this
    /// engine are skipped.
    ///
    /// # Errors
    ///
    /// Returns `BackendUnavailable` if schema creation cannot complete.
    pub fn create_all(&mut self, registry: &SchemaRegistry) -> Result<usize> {
        log_op_start!("create_all", tables = registry.tables().len());
        let start = Instant::now();

        let created =
            schema::create_all(&mut self.conn, &mut self.ledger, registry).map_err(|e| {
                log_op_error!(
                    "create_all",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!(
            "create_all",
            duration_ms = start.elapsed().as_millis() as u64,
            created = created
        );
        Ok(created)
    }

    /// Tables created on this engine, in creation order
    pub fn applied_tables(&self) -> &[AppliedTable] {
        self.ledger.applied()
    }

    /// Start a unit of work for entities of type `E`
    ///
    /// The unit of work borrows the engine exclusively until it is dropped.
    pub fn session<E: Mapped>(&mut self) -> UnitOfWork<'_, E> {
        UnitOfWork::new(self)
    }

    /// Close the connection, reporting any error from SQLite
    ///
    /// Dropping the engine also closes the connection, silently.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if SQLite refuses to close.
    pub fn dispose(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| from_rusqlite(e))?;
        tracing::debug!("engine disposed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declmap_core::{ExErrorKind, User};

    #[test]
    fn test_connect_default() {
        let engine = Engine::in_memory().unwrap();
        assert!(engine.applied_tables().is_empty());
    }

    #[test]
    fn test_connect_rejects_file_url() {
        let err = Engine::connect(EngineConfig::from_url("sqlite:///users.db")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::BackendUnavailable);
        assert_eq!(err.op(), Some("connect"));
    }

    #[test]
    fn test_create_all_then_dispose() {
        let mut engine = Engine::in_memory().unwrap();
        let mut registry = SchemaRegistry::new();
        registry.register::<User>();

        assert_eq!(engine.create_all(&registry).unwrap(), 1);
        assert_eq!(engine.create_all(&registry).unwrap(), 0);
        assert_eq!(engine.applied_tables()[0].table, "users");

        engine.dispose().unwrap();
    }
}
