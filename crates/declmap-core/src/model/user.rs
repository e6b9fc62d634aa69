use std::fmt;

use super::record::{check_column, FieldEnumeration, Mapped, Record};
use super::table::{ColumnDef, TableDef};
use super::value::FieldValue;
use crate::errors::{DeclMapError, Result};

/// Table mapping for [`User`]
pub static USERS_TABLE: TableDef = TableDef {
    name: "users",
    columns: &[
        ColumnDef::primary_key("id"),
        ColumnDef::text("name"),
        ColumnDef::text("fullname"),
        ColumnDef::text("nickname"),
    ],
};

/// User - the sole mapped entity
///
/// Every field is optional at construction. `id` is assigned by the storage
/// backend on commit and cannot change afterwards.
///
/// `User` has a textual representation but deliberately no field-enumeration
/// capability: passing it to the structured serializer fails. Use
/// [`User::fields`] to get a view that can be serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    id: Option<i64>,
    name: Option<String>,
    fullname: Option<String>,
    nickname: Option<String>,
}

impl User {
    /// A user with no fields set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a user from named field values
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if a name is not a mapped column of `users`,
    /// or `TypeMismatch` if a value does not fit its column.
    ///
    /// # Example
    ///
    /// ```
    /// use declmap_core::User;
    ///
    /// let ed = User::from_fields([
    ///     ("name", "ed"),
    ///     ("fullname", "Ed Jones"),
    ///     ("nickname", "edsnickname"),
    /// ])
    /// .unwrap();
    /// assert_eq!(ed.name(), Some("ed"));
    /// ```
    pub fn from_fields<I, K, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        let mut user = Self::new();
        for (name, value) in fields {
            user.set_field(name.as_ref(), value.into())?;
        }
        Ok(user)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fullname(&self) -> Option<&str> {
        self.fullname.as_deref()
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn set_fullname(&mut self, fullname: Option<String>) {
        self.fullname = fullname;
    }

    pub fn set_nickname(&mut self, nickname: Option<String>) {
        self.nickname = nickname;
    }

    /// A serializable view of this user
    pub fn fields(&self) -> UserFields<'_> {
        UserFields(self)
    }
}

fn repr_value(value: &Option<String>) -> FieldValue {
    FieldValue::from(value.clone())
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<User(name='{}', fullname='{}', nickname='{}')>",
            repr_value(&self.name),
            repr_value(&self.fullname),
            repr_value(&self.nickname)
        )
    }
}

impl Record for User {
    fn type_name(&self) -> &'static str {
        "User"
    }
}

impl Mapped for User {
    fn table() -> &'static TableDef {
        &USERS_TABLE
    }

    fn get_field(&self, name: &str) -> Result<FieldValue> {
        match name {
            "id" => Ok(FieldValue::from(self.id)),
            "name" => Ok(FieldValue::from(self.name.clone())),
            "fullname" => Ok(FieldValue::from(self.fullname.clone())),
            "nickname" => Ok(FieldValue::from(self.nickname.clone())),
            _ => Err(DeclMapError::UnknownField {
                entity: "User".to_string(),
                field: name.to_string(),
            }),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        check_column(&USERS_TABLE, "User", name, &value)?;

        let text = value.as_text().map(str::to_string);
        match name {
            "id" => {
                let id = value.as_integer().ok_or_else(|| DeclMapError::TypeMismatch {
                    entity: "User".to_string(),
                    field: "id".to_string(),
                    expected: "INTEGER",
                })?;
                self.assign_primary_key(id)?;
            }
            "name" => self.name = text,
            "fullname" => self.fullname = text,
            "nickname" => self.nickname = text,
            // check_column already rejected unmapped names
            _ => {}
        }
        Ok(())
    }

    fn primary_key(&self) -> Option<i64> {
        self.id
    }

    fn assign_primary_key(&mut self, id: i64) -> Result<()> {
        match self.id {
            Some(existing) if existing != id => Err(DeclMapError::ImmutableField {
                entity: "User".to_string(),
                field: "id".to_string(),
            }),
            _ => {
                self.id = Some(id);
                Ok(())
            }
        }
    }
}

/// Field-enumerating view over a [`User`]
///
/// Serializes as `{"fullname": .., "id": .., "name": .., "nickname": ..}`.
#[derive(Debug, Clone, Copy)]
pub struct UserFields<'a>(&'a User);

impl Record for UserFields<'_> {
    fn type_name(&self) -> &'static str {
        "User"
    }

    fn field_enumeration(&self) -> Option<&dyn FieldEnumeration> {
        Some(self)
    }
}

impl FieldEnumeration for UserFields<'_> {
    fn enumerate_fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::from(self.0.id)),
            ("name", repr_value(&self.0.name)),
            ("fullname", repr_value(&self.0.fullname)),
            ("nickname", repr_value(&self.0.nickname)),
        ]
    }
}
