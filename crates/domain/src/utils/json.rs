//! Helpers for picking values out of loosely shaped upstream JSON

use serde_json::{Map, Value};

/// Walk nested objects by key. Returns `None` as soon as a step is missing or
/// is not an object.
#[must_use]
pub fn safe_get<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// Render an identifier for use in a URL path or a log field.
///
/// Upstream ids arrive as numbers or strings; `null`, empty strings and
/// other shapes count as absent.
#[must_use]
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// First key among `candidates` whose path resolves to a usable id.
#[must_use]
pub fn first_id(value: &Value, candidates: &[&[&str]]) -> Option<Value> {
    candidates
        .iter()
        .filter_map(|path| safe_get(value, path))
        .find(|v| id_string(v).is_some())
        .cloned()
}

/// Non-empty string at `keys`.
#[must_use]
pub fn str_at<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    safe_get(value, keys).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Remove entries whose value is `null`, `""` or the literal `"None"`.
pub fn drop_empty(map: &mut Map<String, Value>) {
    map.retain(|_, v| !is_empty_value(v));
}

/// Whether a value counts as "not provided" for outbound payloads.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => crate::constants::EMPTY_PAYLOAD_SENTINELS.contains(&s.as_str()),
        _ => false,
    }
}
