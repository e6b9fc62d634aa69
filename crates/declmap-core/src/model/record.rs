use super::table::TableDef;
use super::value::FieldValue;
use crate::errors::{DeclMapError, Result};

/// Anything that can be handed to the generic structured serializer
///
/// Records without a field-enumeration capability keep the default
/// `field_enumeration`, and serializing them fails.
pub trait Record {
    /// Type name used in diagnostics
    fn type_name(&self) -> &'static str;

    /// The record's field-enumeration capability, if it has one
    fn field_enumeration(&self) -> Option<&dyn FieldEnumeration> {
        None
    }
}

/// Exposes a record's fields as ordered key/value pairs
pub trait FieldEnumeration {
    fn enumerate_fields(&self) -> Vec<(&'static str, FieldValue)>;
}

/// An entity mapped to a table
///
/// Field access is explicit and name-based; there is no intercepted
/// attribute access. Change tracking is the unit of work's job.
pub trait Mapped: Record + Clone + Default {
    /// Table this entity maps to
    fn table() -> &'static TableDef;

    /// Read a mapped column by name
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the column is not mapped.
    fn get_field(&self, name: &str) -> Result<FieldValue>;

    /// Write a mapped column by name
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for unmapped columns, `TypeMismatch` for a value
    /// of the wrong type, and `ImmutableField` when overwriting an assigned
    /// primary key.
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()>;

    /// Current primary key, `None` before the record is committed
    fn primary_key(&self) -> Option<i64>;

    /// Set the backend-assigned primary key
    ///
    /// # Errors
    ///
    /// Returns `ImmutableField` if a different key is already assigned.
    fn assign_primary_key(&mut self, id: i64) -> Result<()>;

    /// All mapped columns in table order
    fn column_values(&self) -> Result<Vec<(&'static str, FieldValue)>> {
        Self::table()
            .columns
            .iter()
            .map(|c| -> Result<(&'static str, FieldValue)> { Ok((c.name, self.get_field(c.name)?)) })
            .collect()
    }

    /// Rebuild an entity from column values read back from storage
    ///
    /// # Errors
    ///
    /// Propagates `set_field` / `assign_primary_key` failures.
    fn from_columns<I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, FieldValue)>,
    {
        let table = Self::table();
        let mut entity = Self::default();
        for (name, value) in columns {
            let is_pk = table.column(name).map(|c| c.primary_key).unwrap_or(false);
            match (is_pk, value) {
                (true, FieldValue::Integer(id)) => entity.assign_primary_key(id)?,
                (true, FieldValue::Null) => {}
                (_, value) => entity.set_field(name, value)?,
            }
        }
        Ok(entity)
    }
}

/// Check a value against the column it is written to
///
/// Shared by `Mapped` implementations so they report errors uniformly.
pub fn check_column(table: &TableDef, entity: &str, name: &str, value: &FieldValue) -> Result<()> {
    let column = table
        .column(name)
        .ok_or_else(|| DeclMapError::UnknownField {
            entity: entity.to_string(),
            field: name.to_string(),
        })?;

    if !column.column_type.accepts(value) || (!column.nullable && value.is_null()) {
        return Err(DeclMapError::TypeMismatch {
            entity: entity.to_string(),
            field: name.to_string(),
            expected: column.column_type.sql_name(),
        });
    }

    Ok(())
}
