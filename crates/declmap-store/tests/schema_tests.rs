// Integration tests for schema creation

mod common;

use common::users_engine;
use declmap_core::{ExErrorKind, SchemaRegistry, User};
use declmap_store::{Engine, EngineConfig};
use rusqlite::Connection;

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_create_all_creates_exactly_the_users_table() {
    let engine = users_engine();
    assert_eq!(get_table_names(engine.connection()), vec!["users"]);
}

#[test]
fn test_users_columns() {
    let engine = users_engine();
    let mut stmt = engine
        .connection()
        .prepare("SELECT name, type, \"notnull\", pk FROM pragma_table_info('users')")
        .unwrap();
    let columns: Vec<(String, String, i64, i64)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        columns,
        vec![
            ("id".to_string(), "INTEGER".to_string(), 1, 1),
            ("name".to_string(), "TEXT".to_string(), 0, 0),
            ("fullname".to_string(), "TEXT".to_string(), 0, 0),
            ("nickname".to_string(), "TEXT".to_string(), 0, 0),
        ]
    );
}

#[test]
fn test_each_engine_starts_empty() {
    let first = users_engine();
    drop(first);

    let second = Engine::in_memory().unwrap();
    assert!(get_table_names(second.connection()).is_empty());
}

#[test]
fn test_create_all_with_empty_registry() {
    let mut engine = Engine::in_memory().unwrap();
    assert_eq!(engine.create_all(&SchemaRegistry::new()).unwrap(), 0);
}

#[test]
fn test_ledger_records_checksum() {
    let engine = users_engine();
    let applied = &engine.applied_tables()[0];
    assert_eq!(applied.table, "users");
    assert_eq!(applied.checksum.len(), 64);
}

#[test]
fn test_backend_unavailable_for_persistent_url() {
    let err = Engine::connect(EngineConfig::from_url("postgres://localhost/users")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::BackendUnavailable);
    assert_eq!(err.code(), "ERR_BACKEND_UNAVAILABLE");
}

#[test]
fn test_registry_is_explicit_per_engine() {
    let mut registry = SchemaRegistry::new();
    registry.register::<User>();

    let mut a = Engine::in_memory().unwrap();
    let mut b = Engine::in_memory().unwrap();
    assert_eq!(a.create_all(&registry).unwrap(), 1);
    assert_eq!(b.create_all(&registry).unwrap(), 1);
}
