//! Merge/flatten optimizer.
//!
//! Post-processes a freshly built tagged diff: nested same-kind diffs below
//! the merge threshold are inlined under `parent/child` paths, and when
//! every remaining entry is a tagged diff of one single other patch kind
//! the whole diff is promoted to that kind. Both passes trade tag overhead
//! for longer paths.

use serde_json::{Map, Value};

use super::MERGE_THRES;
use crate::error::DeltaError;
use crate::tag::{classify, entry_count, tag_map, DiffTag, TAG_KEY};

/// Flatten `entries` (a diff of kind `kind`) and return its final wire
/// form, which may carry a promoted kind.
pub(super) fn optimize(entries: Map<String, Value>, kind: DiffTag) -> Result<Value, DeltaError> {
    let mut flat = tag_map(kind);
    for (path, child) in entries {
        if path == TAG_KEY {
            continue;
        }
        let inline = classify(&child)? == kind
            && child.as_object().map(entry_count).unwrap_or(0) < MERGE_THRES;
        match child {
            Value::Object(child_entries) if inline => {
                for (child_path, child_value) in child_entries {
                    if child_path == TAG_KEY {
                        continue;
                    }
                    flat.insert(format!("{path}/{child_path}"), child_value);
                }
            }
            other => {
                flat.insert(path, other);
            }
        }
    }

    // Kind promotion: if every entry is a tagged diff of one single other
    // patch kind, re-flatten one more level and retag the whole diff.
    let mut uniform: Option<DiffTag> = None;
    let mut promotable = entry_count(&flat) > 0;
    for (path, child) in &flat {
        if path == TAG_KEY {
            continue;
        }
        let child_tag = classify(child)?;
        let is_patch_kind = matches!(
            child_tag,
            DiffTag::PatchObject | DiffTag::PatchArray | DiffTag::PatchString
        );
        if !is_patch_kind || child_tag == kind || uniform.is_some_and(|k| k != child_tag) {
            promotable = false;
            break;
        }
        uniform = Some(child_tag);
    }

    if promotable {
        if let Some(promoted_kind) = uniform {
            let mut promoted = tag_map(promoted_kind);
            for (path, child) in flat {
                if path == TAG_KEY {
                    continue;
                }
                if let Value::Object(child_entries) = child {
                    for (child_path, child_value) in child_entries {
                        if child_path == TAG_KEY {
                            continue;
                        }
                        promoted.insert(format!("{path}/{child_path}"), child_value);
                    }
                }
            }
            return Ok(Value::Object(promoted));
        }
    }

    Ok(Value::Object(flat))
}
