//! Element-level array differ.
//!
//! Same prefix/suffix-trim structure as strings, but trimming is by
//! recursive diff equality: an element pair trims only when its sub-diff is
//! Unchanged, so a nested edit inside an element blocks the trim.

use serde_json::{Map, Value};

use super::{get_diff, merge};
use crate::error::DeltaError;
use crate::tag::{classify, tag_map, unchanged, DiffTag};

pub(super) fn diff_arrays(old: &[Value], new: &[Value]) -> Result<Value, DeltaError> {
    let old_len = old.len();
    let new_len = new.len();
    let min_len = old_len.min(new_len);

    let mut start = 0;
    while start < min_len {
        let item_diff = get_diff(&old[start], &new[start])?;
        if classify(&item_diff)? != DiffTag::Unchanged {
            break;
        }
        start += 1;
    }

    let mut end = old_len;
    let mut new_end = new_len;
    while end > start && new_end > start {
        let item_diff = get_diff(&old[end - 1], &new[new_end - 1])?;
        if classify(&item_diff)? != DiffTag::Unchanged {
            break;
        }
        end -= 1;
        new_end -= 1;
    }

    if end <= start && old_len == new_len {
        return Ok(unchanged());
    }

    let mut entries = tag_map(DiffTag::PatchArray);

    if old_len == new_len {
        // Per-index sub-diffs, grouped into runs closed by any unchanged
        // element.
        let mut run = Vec::new();
        let mut run_start = start;
        for i in start..end {
            let item_diff = get_diff(&old[i], &new[i])?;
            if classify(&item_diff)? == DiffTag::Unchanged {
                flush_run(&mut entries, &mut run, run_start, i);
                run_start = i + 1;
            } else {
                run.push(item_diff);
            }
        }
        flush_run(&mut entries, &mut run, run_start, end);
    } else {
        // One splice: sub-diffs for the overlapping region, then the
        // remaining new elements verbatim.
        let overlap_end = end.min(new_end);
        let mut splice = Vec::with_capacity(new_end - start);
        for i in start..overlap_end {
            splice.push(get_diff(&old[i], &new[i])?);
        }
        for item in &new[overlap_end..new_end] {
            splice.push(item.clone());
        }
        entries.insert(format!("{start}:{end}"), Value::Array(splice));
    }

    merge::optimize(entries, DiffTag::PatchArray)
}

fn flush_run(entries: &mut Map<String, Value>, run: &mut Vec<Value>, run_start: usize, run_end: usize) {
    let mut items = std::mem::take(run);
    match items.len() {
        0 => {}
        1 => {
            entries.insert(run_start.to_string(), items.swap_remove(0));
        }
        _ => {
            entries.insert(format!("{run_start}:{run_end}"), Value::Array(items));
        }
    }
}
