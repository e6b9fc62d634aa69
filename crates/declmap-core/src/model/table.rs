use super::value::FieldValue;

/// Storage type of a mapped column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    /// Name used in DDL and in type-mismatch diagnostics
    pub fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
        }
    }

    /// Whether `value` can be stored in a column of this type
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (_, FieldValue::Null)
                | (ColumnType::Integer, FieldValue::Integer(_))
                | (ColumnType::Text, FieldValue::Text(_))
        )
    }
}

/// One mapped column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub primary_key: bool,
    pub nullable: bool,
}

impl ColumnDef {
    /// Integer primary key, assigned by the backend
    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Integer,
            primary_key: true,
            nullable: false,
        }
    }

    /// Nullable text column
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Text,
            primary_key: false,
            nullable: true,
        }
    }
}

/// Static description of the table an entity maps to
#[derive(Debug, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary key column, if the table declares one
    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.primary_key)
    }
}
