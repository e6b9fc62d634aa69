//! Walkthrough scripts
//!
//! Each script takes no arguments; errors propagate to `main` uncaught.

pub mod getting_started;
pub mod mutation;
pub mod no_serialization;

use declmap_core::{SchemaRegistry, User};
use declmap_store::{Engine, EngineConfig};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Settings shared by all scripts
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub echo: bool,
}

/// Fresh in-memory engine with the users table created
pub fn users_engine(options: &Options) -> Result<Engine, Box<dyn std::error::Error>> {
    let mut engine = Engine::connect(EngineConfig::default().with_echo(options.echo))?;

    let mut registry = SchemaRegistry::new();
    registry.register::<User>();
    engine.create_all(&registry)?;

    Ok(engine)
}

pub fn ed_user() -> Result<User, Box<dyn std::error::Error>> {
    Ok(User::from_fields([
        ("name", "ed"),
        ("fullname", "Ed Jones"),
        ("nickname", "edsnickname"),
    ])?)
}
