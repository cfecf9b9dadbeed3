//! The item record and the request payload that creates or replaces one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A persisted item. `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

/// Body of a create or update request.
///
/// Binding is lenient the way plain struct decoding is: keys match without
/// regard to ASCII case, absent or `null` fields keep their zero value, and
/// unknown keys (including `id`) are ignored. Only a non-object body or a
/// field of the wrong type is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ItemPayload {
    pub name: String,
    pub price: i64,
}

impl ItemPayload {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Decode a request body. A bare `null` body yields the zero payload.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default)
    }

    /// Pair the payload with an id to form the response record.
    pub fn into_item(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
        }
    }
}

impl TryFrom<Map<String, Value>> for ItemPayload {
    type Error = serde_json::Error;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut payload = ItemPayload::default();

        for (key, value) in fields {
            if value.is_null() {
                continue;
            }
            if key.eq_ignore_ascii_case("name") {
                payload.name = serde_json::from_value(value)?;
            } else if key.eq_ignore_ascii_case("price") {
                payload.price = serde_json::from_value(value)?;
            }
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_ignores_body_id() {
        let payload = ItemPayload::from_json(br#"{"id":42,"name":"Widget","price":500}"#).unwrap();
        assert_eq!(payload, ItemPayload::new("Widget", 500));
    }

    #[test]
    fn test_payload_missing_fields_default() {
        let payload = ItemPayload::from_json(b"{}").unwrap();
        assert_eq!(payload.name, "");
        assert_eq!(payload.price, 0);
    }

    #[test]
    fn test_payload_null_fields_default() {
        let payload = ItemPayload::from_json(br#"{"name":null,"price":5}"#).unwrap();
        assert_eq!(payload, ItemPayload::new("", 5));

        let payload = ItemPayload::from_json(br#"{"name":"x","price":null}"#).unwrap();
        assert_eq!(payload, ItemPayload::new("x", 0));
    }

    #[test]
    fn test_null_body_is_zero_payload() {
        assert_eq!(ItemPayload::from_json(b"null").unwrap(), ItemPayload::default());
        assert_eq!(ItemPayload::from_json(b" null \n").unwrap(), ItemPayload::default());
    }

    #[test]
    fn test_payload_keys_match_any_case() {
        let payload = ItemPayload::from_json(br#"{"Name":"Widget","PRICE":7}"#).unwrap();
        assert_eq!(payload, ItemPayload::new("Widget", 7));
    }

    #[test]
    fn test_payload_rejects_wrong_types() {
        assert!(ItemPayload::from_json(br#"{"name":"x","price":"cheap"}"#).is_err());
        assert!(ItemPayload::from_json(br#"{"name":7,"price":1}"#).is_err());
        assert!(ItemPayload::from_json(br#"{"price":1.5}"#).is_err());
    }

    #[test]
    fn test_payload_rejects_non_object_bodies() {
        assert!(ItemPayload::from_json(b"").is_err());
        assert!(ItemPayload::from_json(b"[1, 2]").is_err());
        assert!(ItemPayload::from_json(b"42").is_err());
        assert!(ItemPayload::from_json(b"{not json").is_err());
    }

    #[test]
    fn test_item_serializes_all_fields() {
        let item = ItemPayload::new("Widget", 500).into_item(3);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "name": "Widget", "price": 500}));
    }
}
