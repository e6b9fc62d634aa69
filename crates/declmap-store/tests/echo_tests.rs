// SQL echo and operation events, observed through the test capture layer

mod common;

use common::{ed, users_engine};
use declmap_core::logging_facility::test_capture::init_test_capture;
use declmap_core::schema::{EVENT_END, EVENT_START};
use declmap_core::{SchemaRegistry, User};
use declmap_store::{Engine, EngineConfig};
use tracing::Level;

#[test]
fn test_echo_emits_ddl_and_insert() {
    let capture = init_test_capture();

    let mut engine = Engine::connect(EngineConfig::default().with_echo(true)).unwrap();
    let mut registry = SchemaRegistry::new();
    registry.register::<User>();
    engine.create_all(&registry).unwrap();

    let mut uow = engine.session::<User>();
    uow.add(ed());
    uow.commit().unwrap();
    drop(uow);

    let statements = capture.sql_statements();
    assert!(statements
        .iter()
        .any(|s| s.contains("CREATE TABLE users") && s.contains("AUTOINCREMENT")));
    assert!(statements.iter().any(|s| s.contains("INSERT INTO users")));

    capture.assert_event_exists("commit", EVENT_START);
    capture.assert_event_exists("commit", EVENT_END);
}

#[test]
fn test_commit_end_event_reports_rows() {
    let capture = init_test_capture();

    let mut engine = users_engine();
    let mut uow = engine.session::<User>();
    uow.add(User::from_fields([("name", "rows_check")]).unwrap());
    uow.add(User::new());
    uow.commit().unwrap();

    let reported = capture
        .events_for("commit")
        .iter()
        .filter(|e| e.event() == Some(EVENT_END) && e.field("rows") == Some("2"))
        .count();
    assert!(reported >= 1);
}

#[test]
fn test_dropping_with_uncommitted_work_warns() {
    let capture = init_test_capture();

    let mut engine = users_engine();
    {
        let mut uow = engine.session::<User>();
        for _ in 0..3 {
            uow.add(User::new());
        }
    }

    let warned = capture.events().into_iter().any(|e| {
        e.level == Level::WARN
            && e.target.starts_with("declmap_store")
            && e.field("staged") == Some("3")
    });
    assert!(warned, "expected a warning for discarded staged records");
}
