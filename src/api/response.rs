use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::errors::{RatReaderError, RatReaderResult};

/// The server signals failures with an `error` field in an otherwise normal
/// JSON object. Any value that is not empty, null, false or zero counts.
fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Turn a raw response into its payload, or the error it reports
pub fn check(value: Value) -> RatReaderResult<Value> {
    if !value.is_object() {
        return Err(RatReaderError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    }

    match error_message(&value) {
        Some(message) => {
            warn!(error = %message, "API reported an error");
            Err(RatReaderError::Api(message))
        }
        None => Ok(value),
    }
}

/// Check a raw response and deserialize its payload
pub fn parse<T: DeserializeOwned>(value: Value) -> RatReaderResult<T> {
    let payload = check(value)?;
    serde_json::from_value(payload).map_err(|e| RatReaderError::MalformedResponse(e.to_string()))
}
