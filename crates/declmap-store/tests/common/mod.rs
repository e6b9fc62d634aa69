use declmap_core::{SchemaRegistry, User};
use declmap_store::Engine;

/// Engine with the users table created
#[allow(dead_code)]
pub fn users_engine() -> Engine {
    let mut engine = Engine::in_memory().expect("in-memory engine");
    let mut registry = SchemaRegistry::new();
    registry.register::<User>();
    engine.create_all(&registry).expect("create users table");
    engine
}

/// The canonical getting-started user
#[allow(dead_code)]
pub fn ed() -> User {
    User::from_fields([
        ("name", "ed"),
        ("fullname", "Ed Jones"),
        ("nickname", "edsnickname"),
    ])
    .expect("valid user fields")
}
