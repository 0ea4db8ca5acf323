//! Response envelope decoding.
//!
//! The platform API is inconsistent about how it wraps payloads. Some
//! endpoints answer `{ "success": true, "message": "...", "data": ... }`,
//! some nest a second envelope inside `data`, and some return the payload
//! bare. Every endpoint declares its [`Shape`] and bodies are decoded
//! strictly against it.

use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use crate::error::ApiError;

/// Envelope layout of an endpoint's response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `{ success, message?, data }`
    Wrapped,
    /// `{ success, message?, data: { data, ... } }`
    DoubleWrapped,
    /// The payload itself.
    Bare,
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Self::Wrapped => "{success, data}",
            Self::DoubleWrapped => "{success, data: {data}}",
            Self::Bare => "a bare payload",
        }
    }
}

/// A decoded payload with the server's message, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload<T> {
    pub data: T,
    pub message: Option<String>,
}

/// Unwraps `body` according to `shape`.
///
/// `endpoint` is only used in error messages.
pub fn unwrap(shape: Shape, body: Value, endpoint: &str) -> Result<Payload<Value>, ApiError> {
    let mismatch = || ApiError::UnexpectedShape {
        endpoint: endpoint.to_string(),
        expected: shape.name(),
    };

    match shape {
        Shape::Bare => {
            if body.as_object().is_some_and(is_envelope) {
                return Err(mismatch());
            }
            Ok(Payload {
                data: body,
                message: None,
            })
        }
        Shape::Wrapped => open_envelope(body).ok_or_else(mismatch)?,
        Shape::DoubleWrapped => {
            let outer = open_envelope(body).ok_or_else(mismatch)??;
            let Value::Object(mut inner) = outer.data else {
                return Err(mismatch());
            };
            let data = inner.remove("data").ok_or_else(mismatch)?;
            Ok(Payload {
                data,
                message: outer.message,
            })
        }
    }
}

/// Parses `text` and decodes the payload into `T`.
pub fn decode<T: DeserializeOwned>(shape: Shape, text: &str, endpoint: &str) -> Result<Payload<T>, ApiError> {
    let body: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text)
            .map_err(|e| ApiError::parse_with_body(format!("invalid JSON: {}", e), text))?
    };

    let payload = unwrap(shape, body, endpoint)?;
    let data = serde_json::from_value(payload.data)
        .map_err(|e| ApiError::parse_with_body(format!("{}: {}", endpoint, e), text))?;
    Ok(Payload {
        data,
        message: payload.message,
    })
}

fn is_envelope(object: &Map<String, Value>) -> bool {
    object.get("success").is_some_and(Value::is_boolean)
}

/// Opens one envelope level.
///
/// Returns `None` if `body` is not an envelope and `Some(Err)` if the
/// server reported failure.
fn open_envelope(body: Value) -> Option<Result<Payload<Value>, ApiError>> {
    let Value::Object(mut object) = body else {
        return None;
    };
    if !is_envelope(&object) {
        return None;
    }

    let success = object.get("success").and_then(Value::as_bool).unwrap_or(false);
    let message = object
        .remove("message")
        .and_then(|m| m.as_str().map(str::to_string));

    if !success {
        return Some(Err(ApiError::Rejected {
            message: message.unwrap_or_else(|| "no message".to_string()),
        }));
    }

    Some(Ok(Payload {
        data: object.remove("data").unwrap_or(Value::Null),
        message,
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_wrapped() {
        let payload = unwrap(
            Shape::Wrapped,
            json!({"success": true, "message": "ok", "data": [1, 2]}),
            "/film/1",
        )
        .unwrap();
        assert_eq!(payload.data, json!([1, 2]));
        assert_eq!(payload.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_double_wrapped() {
        let body = json!({"success": true, "data": {"data": [{"id": "f1"}], "total": 1}});
        let payload = unwrap(Shape::DoubleWrapped, body, "/film/all").unwrap();
        assert_eq!(payload.data, json!([{"id": "f1"}]));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let err = unwrap(Shape::Wrapped, json!([1, 2]), "/film/all").unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape { .. }));

        let single = json!({"success": true, "data": [1, 2]});
        let err = unwrap(Shape::DoubleWrapped, single, "/film/all").unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape { .. }));

        let enveloped = json!({"success": true, "data": {}});
        let err = unwrap(Shape::Bare, enveloped, "/admin/metrics").unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_rejected() {
        let body = json!({"success": false, "message": "Email already registered"});
        let err = unwrap(Shape::Wrapped, body, "/user/register").unwrap_err();
        assert_eq!(err.to_string(), "Request rejected: Email already registered");
    }

    #[test]
    fn test_decode_reports_parse_errors() {
        let err = decode::<Vec<u32>>(Shape::Bare, "{not json", "/x").unwrap_err();
        assert!(matches!(err, ApiError::Parse { body: Some(_), .. }));

        let err = decode::<Vec<u32>>(Shape::Bare, r#"["a"]"#, "/x").unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }
}
