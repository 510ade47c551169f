//! Per-field decoding of client JSON
//!
//! Request bodies are decoded into `serde_json::Value` first and each field
//! is read with these helpers, so a mistyped field only loses its own value.

use serde_json::Value;

use crate::money::parse_yen;

/// Whole number from a JSON number or numeric string; floats truncate
/// toward zero.
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

/// Like [`integer`], also accepting display amounts such as `¥630,000`
pub fn amount(value: &Value) -> Option<i64> {
    integer(value).or_else(|| value.as_str().and_then(parse_yen))
}

/// String content of a scalar; numbers and booleans are written out
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `field` of `object` as text, empty when missing or not a scalar
pub fn text_field(object: &Value, field: &str) -> String {
    object.get(field).and_then(text).unwrap_or_default()
}

/// `field` of `object` as an amount, zero when missing or unreadable
pub fn amount_field(object: &Value, field: &str) -> i64 {
    object.get(field).and_then(amount).unwrap_or_default()
}

fn truncate(f: f64) -> Option<i64> {
    let t = f.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}
