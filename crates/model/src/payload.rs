//! Encoding of payloads as multipart text fields
//!
//! When a mutation carries images the API expects `multipart/form-data`.
//! Scalar fields are sent as text, arrays as repeated `name[]` parts,
//! booleans as `1`/`0`, nested objects as JSON text. `null` is omitted.

use sejour_core::{MarketError, MarketResult};
use serde::Serialize;
use serde_json::Value;

/// Flatten a payload into ordered `(name, value)` text parts
pub fn multipart_fields<T: Serialize>(payload: &T) -> MarketResult<Vec<(String, String)>> {
    let value = serde_json::to_value(payload)?;
    let Value::Object(map) = value else {
        return Err(MarketError::UnexpectedPayload(
            "multipart payload must serialize to an object".to_string(),
        ));
    };

    let mut fields = Vec::with_capacity(map.len());
    for (name, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let key = format!("{}[]", name);
                for item in items {
                    if let Some(text) = scalar_text(&item) {
                        fields.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(&other) {
                    fields.push((name, text));
                }
            }
        }
    }
    Ok(fields)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
