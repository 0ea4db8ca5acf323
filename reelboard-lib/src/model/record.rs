//! Dynamic record

use std::collections::HashMap;

use serde::Serialize;

use super::Value;
use crate::error::FieldError;

static NULL: Value = Value::Null;

/// One row of caller-supplied data.
///
/// Records hold field values as a `HashMap<String, Value>`. The table view
/// treats them as opaque apart from the designated key field, so any typed
/// entity can be shown once converted with [`Record::from_entity`].
///
/// # Example
///
/// ```
/// use reelboard_lib::model::Record;
///
/// let record = Record::new()
///     .set("id", 1i64)
///     .set("name", "Zoe");
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Zoe"));
/// assert!(record.value("missing").is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON object.
    ///
    /// Returns an error if `json` is not an object.
    pub fn from_json(json: serde_json::Value) -> Result<Self, FieldError> {
        match json {
            serde_json::Value::Object(map) => Ok(Self {
                fields: map
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            }),
            other => Err(FieldError::NotAnObject {
                actual: json_kind(&other),
            }),
        }
    }

    /// Builds a record from any serializable entity.
    pub fn from_entity<T: Serialize>(entity: &T) -> Result<Self, FieldError> {
        let json = serde_json::to_value(entity).map_err(|e| FieldError::Serialize(e.to_string()))?;
        Self::from_json(json)
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, treating a missing field as `Null`.
    pub fn value(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts the record back into a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets a numeric field value, widening integers.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(other) => other
                .as_f64()
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_object() {
        let record = Record::from_json(json!({"id": 7, "title": "Nosferatu", "rating": null}))
            .unwrap();
        assert_eq!(record.get_int("id").unwrap(), Some(7));
        assert_eq!(record.get_string("title").unwrap(), Some("Nosferatu"));
        assert_eq!(record.get_string("rating").unwrap(), None);
        assert!(record.get_string("missing").is_err());
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let err = Record::from_json(json!([1, 2])).unwrap_err();
        assert!(matches!(err, FieldError::NotAnObject { actual: "array" }));
    }

    #[test]
    fn test_type_mismatch() {
        let record = Record::new().set("views", 10i64);
        assert!(matches!(
            record.get_string("views"),
            Err(FieldError::TypeMismatch { .. })
        ));
        assert_eq!(record.get_float("views").unwrap(), Some(10.0));
    }
}
