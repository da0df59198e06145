//! Records handled by the admin.
//!
//! The admin is generic over every registered model, so it works with
//! JSON objects rather than typed structs. [`Record`] wraps one such object
//! and adds the few helpers the save hooks and actions need: field access,
//! primary key lookup and "is this a new record" checks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use basic_models_core::{BasicModelsError, BasicModelsResult};

/// A single record being administered.
///
/// # Examples
///
/// ```
/// use basic_models_admin::record::Record;
/// use serde_json::json;
///
/// let mut record = Record::new();
/// record.set("name", json!("Front page"));
/// assert!(record.is_new("id"));
///
/// record.set("id", json!(7));
/// assert_eq!(record.pk("id"), Some("7".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> BasicModelsResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(BasicModelsError::SerializationError(format!(
                "expected a JSON object for a record, got {other}"
            ))),
        }
    }

    /// Returns the value of `field`, if set.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Sets `field` to `value`, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    /// Removes `field` from the record, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Returns `true` if the record carries `field` (even when it is `null`).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns `true` if `field` is missing, `null` or an empty string.
    pub fn is_blank(&self, field: &str) -> bool {
        match self.fields.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }

    /// Returns the primary key as a string, or `None` if the record has none.
    pub fn pk(&self, pk_field: &str) -> Option<String> {
        match self.fields.get(pk_field)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Returns `true` if the record has never been saved (no primary key).
    pub fn is_new(&self, pk_field: &str) -> bool {
        self.pk(pk_field).is_none()
    }

    /// Returns the record's fields.
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the record, returning it as a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for Record {
    type Error = BasicModelsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_record_has_no_pk() {
        let record = Record::new();
        assert!(record.is_new("id"));
        assert_eq!(record.pk("id"), None);
    }

    #[test]
    fn test_null_and_empty_pk_are_new() {
        let record = Record::from_value(json!({"id": null})).unwrap();
        assert!(record.is_new("id"));
        let record = Record::from_value(json!({"id": ""})).unwrap();
        assert!(record.is_new("id"));
    }

    #[test]
    fn test_numeric_and_string_pk() {
        let record = Record::from_value(json!({"id": 42})).unwrap();
        assert_eq!(record.pk("id"), Some("42".to_string()));
        let record = Record::from_value(json!({"uuid": "a-b"})).unwrap();
        assert_eq!(record.pk("uuid"), Some("a-b".to_string()));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = Record::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, BasicModelsError::SerializationError(_)));
    }

    #[test]
    fn test_set_get_remove() {
        let mut record = Record::new();
        assert_eq!(record.set("name", json!("a")), None);
        assert_eq!(record.set("name", json!("b")), Some(json!("a")));
        assert_eq!(record.get("name"), Some(&json!("b")));
        assert!(record.contains("name"));
        assert_eq!(record.remove("name"), Some(json!("b")));
        assert!(!record.contains("name"));
    }

    #[test]
    fn test_is_blank() {
        let record = Record::from_value(json!({"a": "", "b": null, "c": "x", "d": 0})).unwrap();
        assert!(record.is_blank("a"));
        assert!(record.is_blank("b"));
        assert!(!record.is_blank("c"));
        assert!(!record.is_blank("d"));
        assert!(record.is_blank("missing"));
    }

    #[test]
    fn test_serializes_transparently() {
        let record = Record::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"name": "x"}));
    }
}
