//! Diff construction: top-level type dispatch plus the per-type differs.

mod array;
mod merge;
mod object;
mod string;

use serde_json::Value;

use crate::error::DeltaError;
use crate::tag::unchanged;

/// Nested same-kind diffs with fewer than this many entries (excluding the
/// tag) are flattened into their parent, bounding path-length blowup.
pub const MERGE_THRES: usize = 6;

/// A string patch is only emitted when at least this many characters are
/// preserved across prefix and suffix; below that, per-range overhead
/// exceeds the savings and a wholesale replacement is smaller.
pub const STRING_PRESERVE_MIN: usize = 20;

/// Compute the delta that transforms `old` into `new`.
///
/// Structural diffing only happens when both sides have the same dynamic
/// type; a type change always replaces wholesale.
pub(crate) fn get_diff(old: &Value, new: &Value) -> Result<Value, DeltaError> {
    match (old, new) {
        (Value::Null, Value::Null) => Ok(unchanged()),
        (Value::Bool(a), Value::Bool(b)) if a == b => Ok(unchanged()),
        (Value::Number(a), Value::Number(b)) if a == b => Ok(unchanged()),
        (Value::String(a), Value::String(b)) => Ok(string::diff_strings(a, b)),
        (Value::Array(a), Value::Array(b)) => array::diff_arrays(a, b),
        (Value::Object(a), Value::Object(b)) => object::diff_objects(a, b),
        _ => Ok(new.clone()),
    }
}
