use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

use crate::DocumentId;

/// A schema-free JSON object as received from a caller or stored in a collection.
pub type Document = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Availability {
    Flag(bool),
    Status(String),
}

// Read models are views over whatever the write paths stored. Only `_id` is
// guaranteed; every other known field is kept as raw JSON so one off-shape
// document cannot fail a whole listing.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Value>,
    #[serde(flatten)]
    pub extra: Document,
}

impl Room {
    pub fn price(&self) -> Option<f64> {
        self.price_per_night.as_ref().and_then(Value::as_f64)
    }

    /// Embedded reviews; empty when the field is absent or not an array.
    pub fn review_list(&self) -> &[Value] {
        match &self.reviews {
            Some(Value::Array(list)) => list,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(rename = "reviewGiven", default, skip_serializing_if = "Option::is_none")]
    pub review_given: Option<Value>,
    #[serde(flatten)]
    pub extra: Document,
}

impl Booking {
    pub fn email(&self) -> Option<&str> {
        self.email.as_ref().and_then(Value::as_str)
    }

    /// Only a stored `true` counts as reviewed.
    pub fn is_reviewed(&self) -> bool {
        self.review_given.as_ref().and_then(Value::as_bool).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(flatten)]
    pub extra: Document,
}

/// Cross-type rank of the document store's sort order, restricted to the
/// types JSON can carry. A missing field sorts as null.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Object(_) => 3,
        Value::Array(_) => 4,
        Value::Bool(_) => 5,
    }
}

/// Orders two field values the way the document store sorts mixed types:
/// null < numbers < strings < objects < arrays < booleans. Within a type,
/// numbers compare numerically, strings lexicographically, `false < true`.
/// Objects and arrays compare equal among themselves.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);

    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Inclusive bounds on `price_per_night`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub gte: f64,
    pub lte: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.gte && price <= self.lte
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_room_keeps_unknown_fields() {
        let room: Room = serde_json::from_value(json!({
            "_id": "65f1a2b3c4d5e6f708192a3b",
            "price_per_night": 120,
            "availability": true,
            "room_size": "40 sqm",
        }))
        .unwrap();

        assert_eq!(room.price(), Some(120.0));
        assert!(room.review_list().is_empty());

        let back = serde_json::to_value(&room).unwrap();
        assert_eq!(back["price_per_night"], json!(120));
        assert_eq!(back["room_size"], json!("40 sqm"));
        assert!(back.get("reviews").is_none());
    }

    #[test]
    fn test_room_without_price_still_decodes() {
        let room: Room = serde_json::from_value(json!({
            "_id": "65f1a2b3c4d5e6f708192a3b",
            "price_per_night": "ask at desk",
            "reviews": "none",
        }))
        .unwrap();

        assert_eq!(room.price(), None);
        assert!(room.review_list().is_empty());
    }

    #[test]
    fn test_booking_tolerates_off_shape_fields() {
        let booking: Booking = serde_json::from_value(json!({
            "_id": "65f1a2b3c4d5e6f708192a3b",
            "email": "guest@example.com",
            "date": 1_717_200_000_000u64,
            "reviewGiven": "no",
        }))
        .unwrap();

        assert_eq!(booking.email(), Some("guest@example.com"));
        assert!(!booking.is_reviewed());

        let back = serde_json::to_value(&booking).unwrap();
        assert_eq!(back["date"], json!(1_717_200_000_000u64));
        assert_eq!(back["reviewGiven"], json!("no"));
    }

    #[test]
    fn test_value_ordering_follows_store_types() {
        let n1 = json!(1_700_000_000_000u64);
        let n2 = json!(1_800_000_000_000u64);
        let text = json!("2024-01-01T00:00:00Z");
        let flag = json!(true);

        assert_eq!(compare_values(Some(&n1), Some(&n2)), Ordering::Less);
        assert_eq!(compare_values(Some(&n2), Some(&text)), Ordering::Less);
        assert_eq!(compare_values(Some(&text), Some(&json!({}))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!([])), Some(&flag)), Ordering::Less);
        assert_eq!(compare_values(None, Some(&json!(null))), Ordering::Equal);
        assert_eq!(compare_values(None, Some(&n1)), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(false)), Some(&flag)), Ordering::Less);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let range = PriceRange { gte: 100.0, lte: 200.0 };
        assert!(range.contains(100.0));
        assert!(range.contains(200.0));
        assert!(!range.contains(200.5));
    }
}
