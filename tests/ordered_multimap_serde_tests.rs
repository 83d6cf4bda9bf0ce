#![cfg(feature = "serde")]
//! Serde support for OrderedMultiMap and Violation.

use rstest::rstest;
use violation_tree::{OrderedMultiMap, Violation, ViolationIndex};

#[rstest]
fn test_serialize_map_in_key_order() {
    let map: OrderedMultiMap<String, i32> = [("b", 2), ("a", 1), ("b", 3)]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"a":[1],"b":[2,3]}"#);
}

#[rstest]
fn test_serialize_violation() {
    let violation = Violation::new("2023-11-11", "Speeding");
    let json = serde_json::to_string(&violation).unwrap();
    assert_eq!(json, r#"{"occurred_on":"2023-11-11","description":"Speeding"}"#);
}

#[rstest]
fn test_deserialize_restores_index() {
    let mut index = ViolationIndex::new();
    index.record("CD5678", "2023-11-13", "Driving without a seatbelt");
    index.record("AB1234", "2023-11-11", "Speeding");
    index.record("AB1234", "2023-11-12", "Parking in a no-parking zone");

    let json = serde_json::to_string(&index).unwrap();
    let restored: ViolationIndex = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, index);
    assert_eq!(restored.record_count(), 3);
}

#[rstest]
fn test_deserialize_rejects_empty_record_list() {
    let result: Result<OrderedMultiMap<String, i32>, _> = serde_json::from_str(r#"{"a":[]}"#);
    assert!(result.is_err());
}

#[rstest]
fn test_deserialize_empty_object() {
    let map: OrderedMultiMap<String, i32> = serde_json::from_str("{}").unwrap();
    assert!(map.is_empty());
}
