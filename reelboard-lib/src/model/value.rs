//! Value enum for dynamic field values

use std::borrow::Cow;
use std::fmt;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;

/// A dynamic value held by a [`Record`](super::Record) field.
///
/// Values are produced from API JSON payloads, so the variants follow what
/// JSON can carry. Strings stay strings, timestamps included, so search
/// sees exactly what the server sent; `DateTime` only comes from Rust code.
///
/// | JSON                | Rust Variant |
/// |---------------------|--------------|
/// | null / missing      | `Null`       |
/// | true / false        | `Bool`       |
/// | integral number     | `Int`        |
/// | other number        | `Float`      |
/// | string              | `String`     |
/// | array / object      | `Json`       |
///
/// # Example
///
/// ```
/// use reelboard_lib::model::Value;
///
/// let title = Value::from("Metropolis");
/// let views = Value::from(1_200i64);
/// let empty = Value::Null;
/// assert_eq!(title.to_string(), "Metropolis");
/// assert!(empty.is_null());
/// # let _ = views;
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null or missing value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Date and time.
    DateTime(DateTime<Utc>),
    /// Arrays and nested objects, kept as raw JSON.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Json(_) => "json",
        }
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as plain text, without display formatting.
    ///
    /// Strings are returned as is, arrays and objects as compact JSON and
    /// timestamps in RFC 3339. `None` for null.
    pub fn raw_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::DateTime(dt) => Some(Cow::Owned(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))),
            Value::Json(v) => Some(Cow::Owned(v.to_string())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Returns `true` if the raw text of this value contains `needle`,
    /// ignoring case.
    ///
    /// `needle` must already be lowercase. Null never matches.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.raw_text()
            .is_some_and(|text| text.to_lowercase().contains(needle))
    }

    /// Converts the value back into JSON.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            Value::Json(v) => v.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            Value::Json(serde_json::Value::Array(items)) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| Value::from(item.clone()).to_string())
                    .collect();
                f.write_str(&parts.join(", "))
            }
            Value::Json(v) => write!(f, "{}", v),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(json!(42)), Value::Int(42));
        assert_eq!(Value::from(json!(2.5)), Value::Float(2.5));
        assert_eq!(Value::from(json!(null)), Value::Null);
    }

    #[test]
    fn test_from_json_keeps_timestamp_strings() {
        let value = Value::from(json!("2024-03-01T10:30:00Z"));
        assert_eq!(value.as_str(), Some("2024-03-01T10:30:00Z"));
    }

    #[test]
    fn test_raw_text() {
        assert_eq!(Value::from(json!(["drama", "noir"])).raw_text().unwrap(), r#"["drama","noir"]"#);
        assert_eq!(Value::from(2.5).raw_text().unwrap(), "2.5");
        assert!(Value::Null.raw_text().is_none());

        let dt = DateTime::parse_from_rfc3339("2024-03-01T10:30:45Z").unwrap().with_timezone(&Utc);
        assert_eq!(Value::from(dt).raw_text().unwrap(), "2024-03-01T10:30:45Z");
        // Display is for people, search is not
        assert_eq!(Value::from(dt).to_string(), "2024-03-01 10:30");
        assert!(!Value::from(dt).contains_lowercase("2024-03-01 10:30"));
    }

    #[test]
    fn test_display_joins_arrays() {
        let value = Value::from(json!(["drama", "noir"]));
        assert_eq!(value.to_string(), "drama, noir");
    }

    #[test]
    fn test_contains_lowercase() {
        assert!(Value::from("Bob").contains_lowercase("bo"));
        assert!(Value::from(1984i64).contains_lowercase("98"));
        assert!(!Value::Null.contains_lowercase(""));
        assert!(Value::from(json!(["drama", "noir"])).contains_lowercase("\"noir\""));
        assert!(!Value::from(json!(["drama", "noir"])).contains_lowercase("drama, noir"));
    }
}
