//! Diff application: dispatch on the diff tag and mutate the target value
//! in place through resolved paths.
//!
//! Appliers mirror the differs structurally. A failure aborts the call and
//! leaves the value partially mutated; rollback is the caller's concern.

use serde_json::{Map, Value};

use crate::error::DeltaError;
use crate::path::{parse_segment_range, resolve, SegmentRange};
use crate::tag::{classify, DiffTag, TAG_KEY};

pub(crate) fn apply_diff(value: &mut Value, diff: &Value) -> Result<(), DeltaError> {
    let tag = classify(diff)?;
    let entries = match (tag, diff) {
        (DiffTag::Delete, _) => {
            // A delete marker is a key-removal instruction consumed by the
            // parent object applier, never a diff in its own right.
            return Err(DeltaError::UnsupportedTag(
                "delete marker outside an object patch".to_string(),
            ));
        }
        (DiffTag::Unchanged, _) => return Ok(()),
        (DiffTag::Replace, _) => {
            *value = diff.clone();
            return Ok(());
        }
        (_, Value::Object(entries)) => entries,
        // classify only reports patch kinds for objects.
        (_, _) => return Err(DeltaError::UnsupportedTag(tag.as_char().to_string())),
    };
    match tag {
        DiffTag::PatchObject => apply_patch_object(value, entries),
        DiffTag::PatchArray => apply_patch_array(value, entries),
        _ => apply_patch_string(value, entries),
    }
}

fn apply_patch_object(value: &mut Value, entries: &Map<String, Value>) -> Result<(), DeltaError> {
    for (path, child) in entries {
        if path == TAG_KEY {
            continue;
        }
        let (container, last_key) = resolve(value, path)?;
        let Value::Object(map) = container else {
            return Err(DeltaError::TypeMismatch { tag: 'P', expected: "an object" });
        };
        if !map.contains_key(last_key) {
            // Addition recorded by the differ: insert verbatim.
            map.insert(last_key.to_string(), child.clone());
        } else if classify(child)? == DiffTag::Delete {
            map.remove(last_key);
        } else if let Some(target) = map.get_mut(last_key) {
            apply_diff(target, child)?;
        }
    }
    Ok(())
}

fn apply_patch_array(value: &mut Value, entries: &Map<String, Value>) -> Result<(), DeltaError> {
    for (path, child) in entries {
        if path == TAG_KEY {
            continue;
        }
        let (container, last_key) = resolve(value, path)?;
        let Value::Array(items) = container else {
            return Err(DeltaError::TypeMismatch { tag: 'A', expected: "an array" });
        };
        match parse_segment_range(last_key)? {
            SegmentRange::Index(index) => {
                let len = items.len();
                let target = items.get_mut(index).ok_or_else(|| {
                    DeltaError::IndexOutOfRange(format!("{index} >= {len}"))
                })?;
                apply_diff(target, child)?;
            }
            SegmentRange::Range(range_start, range_end) => {
                let Value::Array(payload) = child else {
                    return Err(DeltaError::TypeMismatch {
                        tag: 'A',
                        expected: "a splice payload array",
                    });
                };
                splice_array(items, range_start, range_end, payload)?;
            }
        }
    }
    Ok(())
}

/// Replace `items[start..end)` with the splice payload: sub-diffs applied
/// to the surviving overlap, remaining payload entries inserted verbatim,
/// and the tail shifted to its new position.
fn splice_array(
    items: &mut Vec<Value>,
    start: usize,
    end: usize,
    payload: &[Value],
) -> Result<(), DeltaError> {
    let old_len = items.len();
    if end > old_len {
        return Err(DeltaError::IndexOutOfRange(format!(
            "{start}:{end} on length {old_len}"
        )));
    }
    let new_end = start + payload.len();
    let overlap_end = end.min(new_end);

    let tail = items.split_off(end);
    for i in start..overlap_end {
        apply_diff(&mut items[i], &payload[i - start])?;
    }
    items.truncate(overlap_end);
    for inserted in &payload[overlap_end - start..] {
        items.push(inserted.clone());
    }
    items.extend(tail);
    Ok(())
}

fn apply_patch_string(value: &mut Value, entries: &Map<String, Value>) -> Result<(), DeltaError> {
    for (path, child) in entries {
        if path == TAG_KEY {
            continue;
        }
        let (container, last_key) = resolve(value, path)?;
        let Value::String(text) = container else {
            return Err(DeltaError::TypeMismatch { tag: 'S', expected: "a string" });
        };
        let Value::String(replacement) = child else {
            return Err(DeltaError::TypeMismatch { tag: 'S', expected: "a replacement string" });
        };
        let (range_start, range_end) = match parse_segment_range(last_key)? {
            SegmentRange::Index(index) => (index, index + 1),
            SegmentRange::Range(s, e) => (s, e),
        };
        let chars: Vec<char> = text.chars().collect();
        if range_end > chars.len() {
            return Err(DeltaError::IndexOutOfRange(format!(
                "{range_start}:{range_end} on length {}",
                chars.len()
            )));
        }
        let mut patched: String = chars[..range_start].iter().collect();
        patched.push_str(replacement);
        patched.extend(&chars[range_end..]);
        *text = patched;
    }
    Ok(())
}
