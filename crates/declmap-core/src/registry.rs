//! Explicit schema registry
//!
//! Collects the tables of mapped entities. The registry is an ordinary value
//! handed to whichever component creates the schema; nothing registers
//! itself globally.

use crate::model::{Mapped, TableDef};

/// Ordered set of mapped tables
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: Vec<&'static TableDef>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the table of a mapped entity type
    pub fn register<E: Mapped>(&mut self) -> &mut Self {
        self.register_table(E::table())
    }

    /// Register a table definition
    ///
    /// Registering a table name twice keeps the first definition.
    pub fn register_table(&mut self, table: &'static TableDef) -> &mut Self {
        if self.get(table.name).is_none() {
            tracing::debug!(table = table.name, "registered mapped table");
            self.tables.push(table);
        }
        self
    }

    /// Tables in registration order
    pub fn tables(&self) -> &[&'static TableDef] {
        &self.tables
    }

    pub fn get(&self, name: &str) -> Option<&'static TableDef> {
        self.tables.iter().copied().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[test]
    fn test_register_entity() {
        let mut registry = SchemaRegistry::new();
        registry.register::<User>();
        assert_eq!(registry.tables().len(), 1);
        assert_eq!(registry.get("users").map(|t| t.columns.len()), Some(4));
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let mut registry = SchemaRegistry::new();
        registry.register::<User>().register::<User>();
        assert_eq!(registry.tables().len(), 1);
    }
}
