//! Mapped entity model
//!
//! Entities declare their table shape explicitly (`TableDef`) and expose
//! name-based field access through `Mapped`. Field enumeration for generic
//! serialization is a separate, opt-in capability (`FieldEnumeration`).

pub mod record;
pub mod table;
pub mod user;
pub mod value;

pub use record::{FieldEnumeration, Mapped, Record};
pub use table::{ColumnDef, ColumnType, TableDef};
pub use user::{User, UserFields, USERS_TABLE};
pub use value::FieldValue;
