//! Generic structured serializer
//!
//! Produces attribute/value JSON for any [`Record`] that exposes a
//! field-enumeration capability, and fails for records that do not.

use serde_json::{Map, Value};

use crate::errors::{DeclMapError, Result};
use crate::model::Record;

/// Serialize a record to a JSON object
///
/// # Errors
///
/// Returns `NotSerializable` if the record has no field-enumeration
/// capability.
pub fn to_structured(record: &dyn Record) -> Result<Value> {
    let fields = record
        .field_enumeration()
        .ok_or_else(|| DeclMapError::NotSerializable {
            type_name: record.type_name().to_string(),
        })?;

    let mut object = Map::new();
    for (name, value) in fields.enumerate_fields() {
        object.insert(name.to_string(), serde_json::to_value(value)?);
    }
    Ok(Value::Object(object))
}

/// Serialize a record to a compact JSON string
///
/// # Errors
///
/// Same as [`to_structured`].
pub fn to_json_string(record: &dyn Record) -> Result<String> {
    let value = to_structured(record)?;
    Ok(serde_json::to_string(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[test]
    fn test_bare_user_is_not_serializable() {
        let ed = User::from_fields([("name", "ed")]).unwrap();
        let err = to_structured(&ed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Object of type User is not JSON serializable"
        );
    }

    #[test]
    fn test_fields_view_serializes() {
        let ed = User::from_fields([("name", "ed"), ("nickname", "eddie")]).unwrap();
        let json = to_json_string(&ed.fields()).unwrap();
        assert_eq!(
            json,
            r#"{"fullname":null,"id":null,"name":"ed","nickname":"eddie"}"#
        );
    }
}
