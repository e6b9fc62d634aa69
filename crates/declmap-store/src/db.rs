//! Database connection management
//!
//! Opens the ephemeral SQLite connection behind an `Engine`

use declmap_core::schema::SQL_TARGET;
use rusqlite::Connection;

use crate::config::EngineConfig;
use crate::errors::{backend_unavailable, Result};

fn echo_sql(sql: &str) {
    tracing::info!(target: SQL_TARGET, sql = sql);
}

/// Open an in-memory connection, echoing statements if the config asks for it
pub fn open(config: &EngineConfig) -> Result<Connection> {
    let mut conn = Connection::open_in_memory()
        .map_err(|e| backend_unavailable("connect", e.to_string()))?;
    if config.echo {
        conn.trace(Some(echo_sql));
    }
    Ok(conn)
}
