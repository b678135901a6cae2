//! End-to-end behavior of the sequence operations through the public API.

use rowfold_core::{
    Error, ErrorKind,
    collect::CollectError,
    prelude::*,
};
use serde_json::json;

#[test]
fn sort_by_age_ascending_then_descending() {
    let mut rows = Rows::from(json!([{ "age": 3 }, { "age": 1 }, { "age": 2 }]));

    rows.sort_by_keys(&Value::from(json!([{ "name": "age" }])))
        .expect("ascending sort");
    assert_eq!(rows, Rows::from(json!([{ "age": 1 }, { "age": 2 }, { "age": 3 }])));

    rows.sort_by_keys(&Value::from(json!([{ "name": "age", "order": "desc" }])))
        .expect("descending sort");
    assert_eq!(rows, Rows::from(json!([{ "age": 3 }, { "age": 2 }, { "age": 1 }])));
}

#[test]
fn presorted_group_collect() {
    let rows = Rows::from(json!([
        { "g": "a", "v": 1 },
        { "g": "a", "v": 2 },
        { "g": "b", "v": 3 },
    ]));

    let grouped = Rows::from(
        rows.collect_groups("items", "g", true)
            .expect("collect should succeed"),
    );

    assert_eq!(
        grouped,
        Rows::from(json!([
            { "g": "a", "items": [{ "v": 1 }, { "v": 2 }] },
            { "g": "b", "items": [{ "v": 3 }] },
        ]))
    );
}

#[test]
fn empty_key_spec_wraps_the_sequence_unchanged() {
    let rows = Rows::from(json!([{ "v": 3 }, { "v": 1 }, { "v": 2 }]));

    let collected = rows
        .collect_groups("all", &Value::from(json!([])), false)
        .expect("empty spec");

    let Collected::Whole(whole) = collected else {
        panic!("empty spec must wrap the whole input");
    };
    assert_eq!(
        whole.get("all"),
        Some(&Value::List(vec![Value::List(rows.to_vec())]))
    );
}

#[test]
fn numeric_against_text_is_a_type_mismatch() {
    let mut rows = Rows::from(json!([{ "k": 1 }, { "k": "one" }]));

    let err = rows.sort_by_keys("k").expect_err("mixed kinds");

    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn missing_key_attribute_aborts_the_collect() {
    let rows = Rows::from(json!([
        { "g": "a", "v": 1 },
        { "g": "b", "v": 2 },
        { "v": 3 },
    ]));

    let err = rows
        .collect_groups("items", "g", true)
        .expect_err("missing key");

    assert_eq!(
        err,
        Error::Collect(CollectError::MissingKeyAttribute {
            element: 2,
            field: "g".to_string(),
        })
    );
    assert_eq!(rows.len(), 3);
}

#[test]
fn presorted_flag_on_unsorted_input_fragments_groups() {
    let rows = Rows::from(json!([{ "g": "a" }, { "g": "b" }, { "g": "a" }]));

    let fragmented = rows
        .collect_groups("items", "g", true)
        .expect("trusted presorted");
    let sorted = rows
        .collect_groups("items", "g", false)
        .expect("sorted first");

    assert_eq!(fragmented.group_count(), 3);
    assert_eq!(sorted.group_count(), 2);
}

#[test]
fn canonicalization_is_idempotent() {
    let spec = canonicalize(&Value::from(json!([
        "region",
        { "name": "year", "order": "descending" },
        { "name": "amount", "order": 5 },
    ])))
    .expect("valid spec");

    assert_eq!(
        spec.keys(),
        &[
            SortKey::asc("region"),
            SortKey::desc("year"),
            SortKey::asc("amount"),
        ]
    );
    assert_eq!(canonicalize(&spec.to_value()), Ok(spec));
}

#[test]
fn sorted_output_groups_identically_when_declared_presorted() {
    let mut rows = Rows::from(json!([
        { "g": 2, "v": "x" },
        { "g": 1, "v": "y" },
        { "g": 2, "v": "z" },
        { "g": 1, "v": "w" },
    ]));
    let unsorted_result = rows
        .collect_groups("items", "g", false)
        .expect("collect unsorted");

    rows.sort_by_keys("g").expect("sort");
    let presorted_result = rows
        .collect_groups("items", "g", true)
        .expect("collect presorted");

    assert_eq!(unsorted_result, presorted_result);
}
