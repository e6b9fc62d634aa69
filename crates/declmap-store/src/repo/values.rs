//! Conversions between `FieldValue` and SQLite values

use declmap_core::FieldValue;
use rusqlite::types::{Type, Value, ValueRef};

pub(crate) fn to_sql(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Integer(i) => Value::Integer(*i),
        FieldValue::Text(s) => Value::Text(s.clone()),
    }
}

pub(crate) fn from_sql(idx: usize, name: &str, value: ValueRef<'_>) -> rusqlite::Result<FieldValue> {
    match value {
        ValueRef::Null => Ok(FieldValue::Null),
        ValueRef::Integer(i) => Ok(FieldValue::Integer(i)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|s| FieldValue::Text(s.to_string()))
            .map_err(rusqlite::Error::Utf8Error),
        ValueRef::Real(_) => Err(rusqlite::Error::InvalidColumnType(
            idx,
            name.to_string(),
            Type::Real,
        )),
        ValueRef::Blob(_) => Err(rusqlite::Error::InvalidColumnType(
            idx,
            name.to_string(),
            Type::Blob,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql() {
        assert_eq!(to_sql(&FieldValue::Null), Value::Null);
        assert_eq!(to_sql(&FieldValue::from("ed")), Value::Text("ed".to_string()));
    }

    #[test]
    fn test_from_sql_rejects_real() {
        assert!(from_sql(0, "name", ValueRef::Real(1.5)).is_err());
        assert_eq!(
            from_sql(0, "name", ValueRef::Text(b"ed")).unwrap(),
            FieldValue::from("ed")
        );
    }
}
