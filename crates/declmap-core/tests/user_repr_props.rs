//! Property tests for the User textual representation

use declmap_core::{Mapped, User};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{0,24}"
}

proptest! {
    #[test]
    fn repr_embeds_fields_in_order(name in text(), fullname in text(), nickname in text()) {
        let user = User::from_fields([
            ("name", name.as_str()),
            ("fullname", fullname.as_str()),
            ("nickname", nickname.as_str()),
        ])
        .unwrap();

        prop_assert_eq!(
            user.to_string(),
            format!("<User(name='{}', fullname='{}', nickname='{}')>", name, fullname, nickname)
        );
    }

    #[test]
    fn repr_never_embeds_id(id in 1i64..i64::MAX, name in text()) {
        let mut user = User::from_fields([("name", name.as_str())]).unwrap();
        let before = user.to_string();
        user.assign_primary_key(id).unwrap();
        prop_assert_eq!(user.to_string(), before);
    }

    #[test]
    fn unmapped_names_are_rejected(field in "[a-z]{1,12}") {
        prop_assume!(!["id", "name", "fullname", "nickname"].contains(&field.as_str()));
        prop_assert!(User::from_fields([(field.as_str(), "x")]).is_err());
    }
}
