//! Usage: declmap getting-started

use declmap_core::User;

use super::{ed_user, users_engine, CommandResult, Options};

pub fn execute(options: &Options) -> CommandResult {
    // A user may be constructed without any fields
    let user = User::new();
    println!("{}", user);

    let ed = ed_user()?;
    println!("{}", ed);

    let mut engine = users_engine(options)?;
    {
        let mut session = engine.session::<User>();
        let handle = session.add(ed);
        session.commit()?;

        let ed = session.get(handle)?;
        match ed.id() {
            Some(id) => println!("{} id={}", ed, id),
            None => println!("{} id=None", ed),
        }
    }

    engine.dispose()?;
    Ok(())
}
