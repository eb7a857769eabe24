use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeError;

/// Opaque, caller-defined structured value recorded with each entry.
///
/// The ledger never interprets a payload; it only folds its canonical
/// serialization into the entry digest. The canonical form is JSON with
/// object keys in sorted order (serde_json's default map representation),
/// so the same logical payload always produces the same digest material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    /// Wrap a raw JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Convert any serializable record into a payload.
    ///
    /// This is the choke point where non-serializable caller data is
    /// rejected, before it ever reaches admission.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, TypeError> {
        let value = serde_json::to_value(record)
            .map_err(|e| TypeError::UnserializablePayload(e.to_string()))?;
        Ok(Self(value))
    }

    /// The fixed seed payload carried by the genesis entry.
    pub fn genesis_marker() -> Self {
        Self(Value::String("genesis".to_owned()))
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Compact single-line rendering for history display.
    pub fn to_compact_string(&self) -> String {
        self.0.to_string()
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_record_accepts_plain_structs() {
        #[derive(Serialize)]
        struct Outcome {
            result: &'static str,
            amount: i64,
        }

        let payload = Payload::from_record(&Outcome {
            result: "Win",
            amount: 10,
        })
        .unwrap();
        assert_eq!(payload.as_value(), &json!({"result": "Win", "amount": 10}));
    }

    #[test]
    fn from_record_rejects_non_string_map_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert((1u8, 2u8), "pair");

        let err = Payload::from_record(&map).unwrap_err();
        assert!(matches!(err, TypeError::UnserializablePayload(_)));
    }

    #[test]
    fn canonical_form_sorts_object_keys() {
        let a = Payload::new(json!({"b": 1, "a": 2}));
        let b = Payload::new(json!({"a": 2, "b": 1}));
        assert_eq!(a.to_compact_string(), b.to_compact_string());
    }

    #[test]
    fn genesis_marker_is_stable() {
        assert_eq!(Payload::genesis_marker().to_compact_string(), "\"genesis\"");
    }

    #[test]
    fn serde_is_transparent() {
        let payload = Payload::new(json!({"tier": 3}));
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, "{\"tier\":3}");
        let parsed: Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, payload);
    }
}
