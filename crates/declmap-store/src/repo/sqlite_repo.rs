//! SQLite repository implementation
//!
//! Reads and writes rows of mapped entities. Statements are generated from
//! the entity's `TableDef`. All methods accept a `&Connection`, so they run
//! equally inside a `Transaction`.

use declmap_core::{ColumnDef, ExError, ExErrorKind, FieldValue, Mapped, TableDef};
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};

use super::values::{from_sql, to_sql};
use crate::errors::{from_rusqlite, Result};

/// SQLite repository for mapped entities
pub struct SqliteRepo;

fn primary_key_of(table: &TableDef) -> Result<&ColumnDef> {
    table.primary_key().ok_or_else(|| {
        ExError::new(ExErrorKind::Internal)
            .with_entity(table.name)
            .with_message("Mapped table has no primary key")
    })
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn column_list(table: &TableDef) -> String {
    table
        .columns
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_columns(
    table: &'static TableDef,
    row: &Row<'_>,
) -> rusqlite::Result<Vec<(&'static str, FieldValue)>> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| -> rusqlite::Result<(&'static str, FieldValue)> {
            Ok((column.name, from_sql(idx, column.name, row.get_ref(idx)?)?))
        })
        .collect()
}

impl SqliteRepo {
    /// Insert an entity as a new row
    ///
    /// The primary key is left to the backend unless the entity already
    /// carries one. Returns the row's primary key.
    pub fn insert<E: Mapped>(conn: &Connection, entity: &E) -> Result<i64> {
        let table = E::table();

        let mut names = Vec::new();
        let mut values = Vec::new();
        for (name, value) in entity.column_values()? {
            let is_pk = table.column(name).map(|c| c.primary_key).unwrap_or(false);
            if is_pk && value.is_null() {
                continue;
            }
            names.push(name);
            values.push(to_sql(&value));
        }

        let sql = if names.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", table.name)
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table.name,
                names.join(", "),
                placeholders(names.len())
            )
        };

        conn.execute(&sql, params_from_iter(values.iter()))
            .map_err(from_rusqlite)?;

        Ok(entity
            .primary_key()
            .unwrap_or_else(|| conn.last_insert_rowid()))
    }

    /// Update the given columns of the row with primary key `id`
    ///
    /// Returns the number of rows updated (0 or 1).
    pub fn update<E: Mapped>(
        conn: &Connection,
        id: i64,
        changes: &[(&'static str, FieldValue)],
    ) -> Result<usize> {
        if changes.is_empty() {
            return Ok(0);
        }

        let table = E::table();
        let pk = primary_key_of(table)?;

        let assignments = changes
            .iter()
            .enumerate()
            .map(|(i, (name, _))| format!("{} = ?{}", name, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            table.name,
            assignments,
            pk.name,
            changes.len() + 1
        );

        let mut values: Vec<_> = changes.iter().map(|(_, v)| to_sql(v)).collect();
        values.push(rusqlite::types::Value::Integer(id));

        conn.execute(&sql, params_from_iter(values.iter()))
            .map_err(from_rusqlite)
    }

    /// Get an entity from the database by primary key
    pub fn get<E: Mapped>(conn: &Connection, id: i64) -> Result<Option<E>> {
        let table = E::table();
        let pk = primary_key_of(table)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM {} WHERE {} = ?1",
                column_list(table),
                table.name,
                pk.name
            ))
            .map_err(from_rusqlite)?;

        let columns = stmt
            .query_row([id], |row| read_columns(table, row))
            .optional()
            .map_err(from_rusqlite)?;

        match columns {
            Some(columns) => Ok(Some(E::from_columns(columns)?)),
            None => Ok(None),
        }
    }

    /// Count rows in the entity's table
    pub fn count<E: Mapped>(conn: &Connection) -> Result<i64> {
        conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", E::table().name),
            [],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{create_all, SchemaLedger};
    use declmap_core::{SchemaRegistry, User};

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        let mut registry = SchemaRegistry::new();
        registry.register::<User>();
        create_all(&mut conn, &mut SchemaLedger::default(), &registry).unwrap();
        conn
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let conn = setup();
        let first = SqliteRepo::insert(&conn, &User::new()).unwrap();
        let second = SqliteRepo::insert(&conn, &User::new()).unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_insert_then_get() {
        let conn = setup();
        let ed = User::from_fields([("name", "ed"), ("fullname", "Ed Jones")]).unwrap();
        let id = SqliteRepo::insert(&conn, &ed).unwrap();

        let loaded: User = SqliteRepo::get(&conn, id).unwrap().unwrap();
        assert_eq!(loaded.id(), Some(id));
        assert_eq!(loaded.name(), Some("ed"));
        assert_eq!(loaded.nickname(), None);
    }

    #[test]
    fn test_get_missing_row() {
        let conn = setup();
        let loaded: Option<User> = SqliteRepo::get(&conn, 42).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_update_changes_only_given_columns() {
        let conn = setup();
        let ed = User::from_fields([("name", "ed"), ("nickname", "eddie")]).unwrap();
        let id = SqliteRepo::insert(&conn, &ed).unwrap();

        let updated =
            SqliteRepo::update::<User>(&conn, id, &[("name", FieldValue::from("Bob"))]).unwrap();
        assert_eq!(updated, 1);

        let loaded: User = SqliteRepo::get(&conn, id).unwrap().unwrap();
        assert_eq!(loaded.name(), Some("Bob"));
        assert_eq!(loaded.nickname(), Some("eddie"));
    }

    #[test]
    fn test_count() {
        let conn = setup();
        assert_eq!(SqliteRepo::count::<User>(&conn).unwrap(), 0);
        SqliteRepo::insert(&conn, &User::from_fields([("name", "a")]).unwrap()).unwrap();
        SqliteRepo::insert(&conn, &User::from_fields([("name", "b")]).unwrap()).unwrap();
        assert_eq!(SqliteRepo::count::<User>(&conn).unwrap(), 2);
    }

    #[test]
    fn test_insert_without_table_fails() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteRepo::insert(&conn, &User::new()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Persistence);
    }
}
