//! Per-key object differ.

use serde_json::{Map, Value};

use super::{get_diff, merge, MERGE_THRES};
use crate::error::DeltaError;
use crate::tag::{classify, delete_marker, entry_count, tag_map, unchanged, DiffTag, TAG_KEY};

pub(super) fn diff_objects(
    old: &Map<String, Value>,
    new: &Map<String, Value>,
) -> Result<Value, DeltaError> {
    let mut entries = tag_map(DiffTag::PatchObject);
    let mut num_deleted = 0;
    let mut num_replaced = 0;

    for (key, old_child) in old {
        let Some(new_child) = new.get(key) else {
            entries.insert(key.clone(), delete_marker());
            num_deleted += 1;
            continue;
        };
        let child_diff = get_diff(old_child, new_child)?;
        let child_tag = classify(&child_diff)?;
        if child_tag == DiffTag::PatchObject && diff_entry_count(&child_diff) < MERGE_THRES {
            // Shallow nested object patch: inline its entries as slash
            // paths instead of keeping the tagged wrapper.
            if let Value::Object(child_entries) = child_diff {
                for (child_key, child_value) in child_entries {
                    if child_key == TAG_KEY {
                        continue;
                    }
                    entries.insert(format!("{key}/{child_key}"), child_value);
                }
            }
        } else if child_tag != DiffTag::Unchanged {
            entries.insert(key.clone(), child_diff);
            if child_tag == DiffTag::Replace {
                num_replaced += 1;
            }
        }
    }

    // An incremental patch touching every old key is larger than the
    // replacement itself. Single-key objects are exempt: collapsing them
    // would cascade up through every single-key wrapper and defeat the
    // slash-path flattening. An empty old object has nothing to touch and
    // must still produce a patch with its additions.
    if old.len() > 1 && (num_deleted == old.len() || num_replaced == old.len()) {
        return Ok(Value::Object(new.clone()));
    }

    // Additions are literal inserts; there is no old value to diff against.
    for (key, new_child) in new {
        if !old.contains_key(key) {
            entries.insert(key.clone(), new_child.clone());
        }
    }

    if entry_count(&entries) == 0 {
        return Ok(unchanged());
    }

    merge::optimize(entries, DiffTag::PatchObject)
}

fn diff_entry_count(diff: &Value) -> usize {
    diff.as_object().map(entry_count).unwrap_or(0)
}
