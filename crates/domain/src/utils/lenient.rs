//! Forgiving deserializers for hand-written intake JSON
//!
//! Front-end forms send numbers for zip codes and phone numbers, `null` for
//! blanks, and occasionally booleans. All of those are accepted as text.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize any scalar into `Option<String>`; `null` and objects/arrays
/// become `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::opt_string")]
        zip: Option<String>,
    }

    #[test]
    fn accepts_numbers_and_nulls() {
        let numeric: Probe = serde_json::from_value(json!({"zip": 90210})).expect("valid");
        let null: Probe = serde_json::from_value(json!({"zip": null})).expect("valid");
        let missing: Probe = serde_json::from_value(json!({})).expect("valid");

        assert_eq!(numeric.zip.as_deref(), Some("90210"));
        assert!(null.zip.is_none());
        assert!(missing.zip.is_none());
    }
}
