use chrono::{DateTime, Utc};

/// A table created by `create_all`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTable {
    pub table: &'static str,
    pub checksum: String,
    pub applied_at: DateTime<Utc>,
}

/// Tables created on one engine
///
/// Lives alongside the connection rather than inside the database, so the
/// database holds only mapped tables. It is as ephemeral as the database.
#[derive(Debug, Clone, Default)]
pub struct SchemaLedger {
    applied: Vec<AppliedTable>,
}

impl SchemaLedger {
    pub fn get(&self, table: &str) -> Option<&AppliedTable> {
        self.applied.iter().find(|a| a.table == table)
    }

    pub fn record(&mut self, table: &'static str, checksum: String) {
        self.applied.push(AppliedTable {
            table,
            checksum,
            applied_at: Utc::now(),
        });
    }

    /// Applied tables in creation order
    pub fn applied(&self) -> &[AppliedTable] {
        &self.applied
    }
}
