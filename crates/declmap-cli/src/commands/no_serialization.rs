//! Usage: declmap no-serialization
//!
//! `User` has no field-enumeration capability, so serializing it directly
//! fails and the process exits non-zero.

use declmap_core::{to_json_string, User};

use super::{ed_user, users_engine, CommandResult, Options};

pub fn execute(options: &Options) -> CommandResult {
    let mut engine = users_engine(options)?;
    let mut session = engine.session::<User>();

    let handle = session.add(ed_user()?);
    session.commit()?;
    println!("{}", session.get(handle)?);

    session.set(handle, "name", "Bob")?;
    let ed = session.get(handle)?;
    println!("{}", ed);

    println!("{}", to_json_string(ed)?);

    Ok(())
}
