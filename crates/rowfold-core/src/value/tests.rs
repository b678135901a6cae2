use crate::value::{Record, Value, ValueKind};
use serde_json::json;

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

// ---- kinds -------------------------------------------------------------

#[test]
fn int_and_float_share_the_number_kind() {
    assert_eq!(Value::Int(3).kind(), ValueKind::Number);
    assert_eq!(Value::Float(3.5).kind(), ValueKind::Number);
    assert_eq!(v_txt("x").kind(), ValueKind::Text);
    assert_eq!(Value::Null.kind(), ValueKind::Null);
}

#[test]
fn only_number_and_text_are_orderable() {
    let orderable: Vec<_> = [
        ValueKind::Null,
        ValueKind::Bool,
        ValueKind::Number,
        ValueKind::Text,
        ValueKind::List,
        ValueKind::Record,
    ]
    .into_iter()
    .filter(|kind| kind.is_orderable())
    .collect();

    assert_eq!(orderable, vec![ValueKind::Number, ValueKind::Text]);
}

// ---- record ------------------------------------------------------------

#[test]
fn record_insert_replaces_in_place_and_keeps_order() {
    let mut record = Record::from([("a", 1), ("b", 2), ("c", 3)]);

    assert_eq!(record.insert("b", 20), Some(Value::Int(2)));
    assert_eq!(record.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(record.get("b"), Some(&Value::Int(20)));
}

#[test]
fn record_remove_keeps_remaining_order() {
    let mut record = Record::from([("a", 1), ("b", 2), ("c", 3)]);

    assert_eq!(record.remove("a"), Some(Value::Int(1)));
    assert_eq!(record.remove("missing"), None);
    assert_eq!(record.names().collect::<Vec<_>>(), vec!["b", "c"]);
}

#[test]
fn record_equality_ignores_field_order() {
    let left = Record::from([("a", 1), ("b", 2)]);
    let right = Record::from([("b", 2), ("a", 1)]);
    let other = Record::from([("a", 1), ("b", 3)]);

    assert_eq!(left, right);
    assert_ne!(left, other);
}

#[test]
fn present_null_is_not_a_missing_field() {
    let record = Record::from([("a", Value::Null)]);

    assert!(record.contains("a"));
    assert_eq!(record.get("a"), Some(&Value::Null));
    assert_eq!(record.get("b"), None);
}

// ---- json --------------------------------------------------------------

#[test]
fn json_numbers_keep_integers_integral() {
    assert_eq!(Value::from(json!(7)), Value::Int(7));
    assert_eq!(Value::from(json!(7.5)), Value::Float(7.5));
    assert_eq!(Value::from(json!(u64::MAX)), Value::Float(u64::MAX as f64));
}

#[test]
fn json_objects_become_records() {
    let value = Value::from(json!({ "g": "a", "v": [1, null, true] }));

    let expected = Value::Record(Record::from([
        ("g", v_txt("a")),
        (
            "v",
            Value::List(vec![Value::Int(1), Value::Null, Value::Bool(true)]),
        ),
    ]));
    assert_eq!(value, expected);
}

#[test]
fn serialize_renders_plain_json() {
    let value = Value::from(json!({ "g": "a", "items": [{ "v": 1.5 }] }));

    let rendered = serde_json::to_value(&value).expect("value should serialize");
    assert_eq!(rendered, json!({ "g": "a", "items": [{ "v": 1.5 }] }));
}

#[test]
fn display_quotes_text_and_renders_composites_as_json() {
    assert_eq!(v_txt("asc").to_string(), "\"asc\"");
    assert_eq!(Value::Int(-1).to_string(), "-1");
    assert_eq!(Value::from(json!([1, "x"])).to_string(), "[1,\"x\"]");
}
