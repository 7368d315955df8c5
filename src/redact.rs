//! Secret scrubbing for anything that is printed or logged.

use serde::Serialize;
use serde_json::{Map, Value};

pub const REDACTED: &str = "REDACTED";

const SENSITIVE_KEYS: &[&str] = &[
    "apikey",
    "password",
    "passwd",
    "token",
    "accesstoken",
    "refreshtoken",
    "secret",
    "authorization",
];

fn is_sensitive_key(key: &str) -> bool {
    let lowered = key.to_ascii_lowercase();
    SENSITIVE_KEYS.contains(&lowered.as_str())
}

/// Deep copy of `value` with every sensitive key's value replaced.
///
/// Keys match case-insensitively and keep their original spelling. Arrays and
/// nested objects are walked at every depth; primitives pass through.
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        Value::Object(map) => {
            let mut result = Map::with_capacity(map.len());
            for (key, val) in map {
                let scrubbed = if is_sensitive_key(key) {
                    Value::String(REDACTED.to_string())
                } else {
                    redact(val)
                };
                result.insert(key.clone(), scrubbed);
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}

/// Serialize then redact.
pub fn redact_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
    Ok(redact(&serde_json::to_value(value)?))
}
