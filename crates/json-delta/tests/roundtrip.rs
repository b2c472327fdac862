//! End-to-end diff/patch properties across the supported value kinds.

use json_delta::{classify, diff, patch, DeltaError, DiffTag, MERGE_THRES, TAG_KEY};
use serde_json::{json, Value};

fn roundtrip(old: &Value, new: &Value) -> Value {
    let delta = diff(old, new).expect("diff failed");
    assert_flattening_bound(&delta);
    let mut value = old.clone();
    patch(&mut value, &delta).expect("patch failed");
    value
}

/// No tagged diff may contain, as a direct child, a same-kind tagged diff
/// with fewer than `MERGE_THRES` entries: the optimizer must have
/// flattened it.
fn assert_flattening_bound(delta: &Value) {
    let Value::Object(map) = delta else { return };
    let Ok(kind) = classify(delta) else { return };
    if !matches!(
        kind,
        DiffTag::PatchObject | DiffTag::PatchArray | DiffTag::PatchString
    ) {
        return;
    }
    for (path, child) in map {
        if path == TAG_KEY {
            continue;
        }
        if let Value::Object(child_map) = child {
            if classify(child) == Ok(kind) {
                let entries = child_map.len() - usize::from(child_map.contains_key(TAG_KEY));
                assert!(
                    entries >= MERGE_THRES,
                    "unflattened same-kind child under {path}: {child}"
                );
            }
            assert_flattening_bound(child);
        }
    }
}

#[test]
fn round_trips_across_value_kinds() {
    let values = [
        json!(null),
        json!(true),
        json!(42),
        json!(2.5),
        json!("short"),
        json!("a considerably longer string used for patch coverage"),
        json!([]),
        json!([1, "two", [3], {"four": 4}]),
        json!({}),
        json!({"a": 1, "b": {"c": [true, null]}}),
    ];
    for old in &values {
        for new in &values {
            assert_eq!(&roundtrip(old, new), new, "old={old} new={new}");
        }
    }
}

#[test]
fn self_diff_is_unchanged_and_a_no_op() {
    let values = [
        json!(null),
        json!(7),
        json!("text"),
        json!([1, 2, 3]),
        json!({"a": {"b": "c"}}),
    ];
    for value in &values {
        let delta = diff(value, value).unwrap();
        assert_eq!(classify(&delta), Ok(DiffTag::Unchanged));
        let mut target = value.clone();
        patch(&mut target, &delta).unwrap();
        assert_eq!(&target, value);
    }
}

#[test]
fn type_change_short_circuits_to_replace() {
    let old = json!({"a": [1, 2, 3]});
    let new = json!([1, 2, 3]);
    assert_eq!(diff(&old, &new).unwrap(), new);
}

#[test]
fn short_string_change_replaces_literally() {
    // Fewer than 20 preserved characters in total.
    let old = json!("prefix MIDDLE suffix");
    let new = json!("prefix CENTER suffix");
    let delta = diff(&old, &new).unwrap();
    assert_eq!(classify(&delta), Ok(DiffTag::Replace));
    assert_eq!(delta, new);
}

#[test]
fn scenario_addition_to_empty_object() {
    let old = json!({});
    let new = json!({"a": 1});
    let delta = diff(&old, &new).unwrap();
    assert_eq!(delta, json!({"_t": "P", "a": 1}));
    assert_eq!(roundtrip(&old, &new), new);
}

#[test]
fn scenario_single_index_array_replace() {
    let old = json!([1, 2, 3, 4, 5, 6]);
    let new = json!([1, 2, 9, 4, 5, 6]);
    let delta = diff(&old, &new).unwrap();
    assert_eq!(delta, json!({"_t": "A", "2": 9}));
    assert_eq!(roundtrip(&old, &new), new);
}

#[test]
fn scenario_append_splice() {
    let old = json!([1, 2, 3]);
    let new = json!([1, 2, 3, 4]);
    let delta = diff(&old, &new).unwrap();
    assert_eq!(delta, json!({"_t": "A", "3:3": [4]}));
    assert_eq!(roundtrip(&old, &new), new);
}

#[test]
fn scenario_word_insertion_in_long_string() {
    let old = json!("the quick brown fox jumps over the lazy dog");
    let new = json!("the quick brown spotted fox jumps over the lazy dog");
    let delta = diff(&old, &new).unwrap();
    assert_eq!(classify(&delta), Ok(DiffTag::PatchString));
    let entries = delta.as_object().unwrap();
    assert_eq!(entries.len(), 2, "one range path expected: {delta}");
    assert_eq!(roundtrip(&old, &new), new);
}

#[test]
fn scenario_nested_object_patch_is_flattened() {
    let old = json!({"a": {"b": 1}});
    let new = json!({"a": {"b": 2}});
    let delta = diff(&old, &new).unwrap();
    assert_eq!(delta, json!({"_t": "P", "a/b": 2}));
    assert_eq!(roundtrip(&old, &new), new);
}

#[test]
fn scenario_key_deletion() {
    let old = json!({"a": 1, "b": 2});
    let new = json!({"b": 2});
    let delta = diff(&old, &new).unwrap();
    assert_eq!(delta, json!({"_t": "P", "a": {"_t": "X"}}));
    assert_eq!(roundtrip(&old, &new), new);
}

#[test]
fn object_heuristics_emit_literals() {
    // Every old key deleted.
    let delta = diff(&json!({"a": 1, "b": 2}), &json!({"x": 0})).unwrap();
    assert_eq!(classify(&delta), Ok(DiffTag::Replace));
    // Every old key replaced.
    let delta = diff(&json!({"a": 1, "b": 2}), &json!({"a": "x", "b": "y"})).unwrap();
    assert_eq!(classify(&delta), Ok(DiffTag::Replace));
}

#[test]
fn mixed_deep_edits_round_trip() {
    let old = json!({
        "users": [
            {"name": "Alice", "bio": "likes long walks on the beach at sunset", "age": 30},
            {"name": "Bob", "age": 25}
        ],
        "tags": ["a", "b", "c"],
        "meta": {"version": 1, "flags": {"beta": false}}
    });
    let new = json!({
        "users": [
            {"name": "Alice", "bio": "likes long walks on the shore at sunset", "age": 31},
            {"name": "Bob", "age": 25},
            {"name": "Carol", "age": 41}
        ],
        "tags": ["a", "c"],
        "meta": {"version": 2, "flags": {"beta": true}}
    });
    assert_eq!(roundtrip(&old, &new), new);
    assert_eq!(roundtrip(&new, &old), old);
}

#[test]
fn patch_failures_carry_descriptive_kinds() {
    let mut value = json!({"a": 1});
    let err = patch(&mut value, &json!({"_t": "P", "missing/deep": 1})).unwrap_err();
    assert_eq!(err, DeltaError::PathNotFound("missing".to_string()));

    let mut value = json!({"a": 1});
    let err = patch(&mut value, &json!({"_t": "Z"})).unwrap_err();
    assert!(matches!(err, DeltaError::UnsupportedTag(_)));

    let mut value = json!({"a": "text"});
    let err = patch(&mut value, &json!({"_t": "A", "a/0:1": []})).unwrap_err();
    assert!(matches!(err, DeltaError::TypeMismatch { tag: 'A', .. }));
}
