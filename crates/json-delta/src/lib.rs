//! Compact, reversible deltas between JSON values.
//!
//! [`diff`] computes a tagged delta between two tree-shaped values and
//! [`patch`] applies it back, reconstructing the new value from the old one
//! in place. A delta IS a `serde_json::Value` following the `"_t"` tag
//! convention, so it is stored, logged, and transmitted with the same codec
//! as ordinary data.
//!
//! Tag vocabulary (`"_t"`): `X` delete, `U` unchanged, `R` replace
//! (implicit — any untagged value), `S` patch string, `A` patch array,
//! `P` patch object. Paths inside a tagged diff are `/`-joined chains of
//! field names, indices, and half-open `start:end` ranges.
//!
//! The differ trades optimality for cheap heuristics: common prefix/suffix
//! trimming, per-run grouping, and nested-diff flattening. It never
//! structurally diffs across a type change, and it is purely synchronous
//! and stateless across calls.
//!
//! ```
//! use serde_json::json;
//!
//! let old = json!({"user": {"name": "Alice", "age": 30}});
//! let new = json!({"user": {"name": "Alice", "age": 31}});
//!
//! let delta = json_delta::diff(&old, &new)?;
//! assert_eq!(delta, json!({"_t": "P", "user/age": 31}));
//!
//! let mut value = old.clone();
//! json_delta::patch(&mut value, &delta)?;
//! assert_eq!(value, new);
//! # Ok::<(), json_delta::DeltaError>(())
//! ```

mod apply;
mod diff;
mod error;
mod path;
mod tag;

pub use diff::{MERGE_THRES, STRING_PRESERVE_MIN};
pub use error::DeltaError;
pub use tag::{classify, delete_marker, tagged, unchanged, DiffTag, TAG_KEY};

use serde_json::Value;

/// Compute the delta that transforms `old` into `new`.
///
/// Pure function, no I/O. The result is `Unchanged` when the inputs are
/// equal, an untagged literal when replacement is cheaper than patching,
/// and a tagged patch otherwise.
pub fn diff(old: &Value, new: &Value) -> Result<Value, DeltaError> {
    diff::get_diff(old, new)
}

/// Apply `delta` to `value` in place.
///
/// On failure the value may be left partially mutated; callers that need
/// atomicity must snapshot before calling.
pub fn patch(value: &mut Value, delta: &Value) -> Result<(), DeltaError> {
    apply::apply_diff(value, delta)
}
