//! Schema runner
//!
//! Creates registered tables with checksums and idempotency

use crate::errors::{checksum_mismatch, schema_error, Result};
use crate::schema::checksums::compute_checksum;
use crate::schema::ddl::create_table_sql;
use crate::schema::ledger::SchemaLedger;
use declmap_core::{SchemaRegistry, TableDef};
use rusqlite::Connection;

/// Create every registered table that is not yet in the ledger
///
/// Returns the number of tables created by this call.
///
/// # Errors
///
/// Returns `BackendUnavailable` if a table's DDL fails, or if a table of the
/// same name was already created from a different definition.
pub fn create_all(
    conn: &mut Connection,
    ledger: &mut SchemaLedger,
    registry: &SchemaRegistry,
) -> Result<usize> {
    let mut created = 0;
    for &table in registry.tables() {
        if create_table(conn, ledger, table)? {
            created += 1;
        }
    }
    Ok(created)
}

/// Create a single table if not already created
fn create_table(
    conn: &mut Connection,
    ledger: &mut SchemaLedger,
    table: &'static TableDef,
) -> Result<bool> {
    let sql = create_table_sql(table);
    let checksum = compute_checksum(&sql);

    if let Some(applied) = ledger.get(table.name) {
        if applied.checksum != checksum {
            return Err(checksum_mismatch(table.name, &applied.checksum, &checksum));
        }
        // Idempotent: already created
        return Ok(false);
    }

    let tx = conn
        .transaction()
        .map_err(|e| schema_error(table.name, &e.to_string()))?;
    tx.execute_batch(&sql)
        .map_err(|e| schema_error(table.name, &e.to_string()))?;
    tx.commit()
        .map_err(|e| schema_error(table.name, &e.to_string()))?;

    tracing::debug!(table = table.name, checksum = %checksum, "created table");
    ledger.record(table.name, checksum);

    Ok(true)
}
