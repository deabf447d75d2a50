//! Raw subscription records
//!
//! The fetch layer treats subscription records as opaque JSON values: the
//! coordinator only cares about their existence and count. Field access
//! happens exclusively at the transform boundary, through the lenient
//! helpers defined here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One subscription record exactly as returned by the source API.
///
/// The wrapper is `#[serde(transparent)]` so a raw dump of records
/// round-trips byte-compatibly with the upstream payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Value);

impl RawRecord {
    /// Wrap a JSON value as a raw record
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// String field lookup, `None` when absent or not a string
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Field lookup rendered as a string.
    ///
    /// The API is inconsistent about numeric fields (`id`, `sub_uptime`
    /// arrive as numbers in some responses and strings in others), so both
    /// representations are accepted.
    pub fn string_field(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_str_field() {
        let record = RawRecord::new(json!({"name": "One Piece", "id": 123}));
        assert_eq!(record.str_field("name"), Some("One Piece"));
        assert_eq!(record.str_field("id"), None);
        assert_eq!(record.str_field("missing"), None);
    }

    #[test]
    fn test_string_field_accepts_numbers_and_strings() {
        let record = RawRecord::new(json!({"id": 123, "sub_uptime": "1700000000"}));
        assert_eq!(record.string_field("id"), Some("123".to_string()));
        assert_eq!(
            record.string_field("sub_uptime"),
            Some("1700000000".to_string())
        );
        assert_eq!(record.string_field("missing"), None);
    }

    #[test]
    fn test_transparent_serialization() {
        let record = RawRecord::new(json!({"id": 1, "name": "A"}));
        let serialized = serde_json::to_string(&record).unwrap();
        assert_eq!(serialized, r#"{"id":1,"name":"A"}"#);

        let parsed: RawRecord = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, record);
    }
}
