//! The diff tag convention layered on top of plain JSON values.
//!
//! A diff IS an ordinary `Value`. An object carrying the reserved `"_t"`
//! field with a single-character discriminator is a tagged diff node; any
//! value without it is, in diff position, a wholesale replacement. This
//! lets a diff be stored, logged, and transmitted with the same codec as
//! application data.

use serde_json::{Map, Value};

use crate::error::DeltaError;

/// Reserved key identifying a tagged diff object. Application data must
/// not use it as a real field name.
pub const TAG_KEY: &str = "_t";

/// The kind of a diff value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    /// `X` — remove the addressed key. Only valid inside a `P` diff.
    Delete,
    /// `U` — the two inputs were equal; carries no payload.
    Unchanged,
    /// `R` — implicit: any value without `"_t"` replaces wholesale.
    Replace,
    /// `S` — paths address character ranges of a string.
    PatchString,
    /// `A` — paths address element ranges of an array.
    PatchArray,
    /// `P` — paths address fields of an object.
    PatchObject,
}

impl DiffTag {
    pub fn as_char(self) -> char {
        match self {
            DiffTag::Delete => 'X',
            DiffTag::Unchanged => 'U',
            DiffTag::Replace => 'R',
            DiffTag::PatchString => 'S',
            DiffTag::PatchArray => 'A',
            DiffTag::PatchObject => 'P',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => Some(DiffTag::Delete),
            'U' => Some(DiffTag::Unchanged),
            'R' => Some(DiffTag::Replace),
            'S' => Some(DiffTag::PatchString),
            'A' => Some(DiffTag::PatchArray),
            'P' => Some(DiffTag::PatchObject),
            _ => None,
        }
    }
}

/// Decode the diff kind of `value`.
///
/// The single source of truth for "what kind of diff is this"; diff
/// construction and diff application both go through it so the two sides
/// cannot diverge. Any value that is not an object carrying `"_t"` is a
/// replacement.
pub fn classify(value: &Value) -> Result<DiffTag, DeltaError> {
    let Value::Object(map) = value else {
        return Ok(DiffTag::Replace);
    };
    let Some(tag) = map.get(TAG_KEY) else {
        return Ok(DiffTag::Replace);
    };
    let tag_str = tag.as_str().unwrap_or_default();
    let mut chars = tag_str.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            DiffTag::from_char(c).ok_or_else(|| DeltaError::UnsupportedTag(tag_str.to_string()))
        }
        _ => Err(DeltaError::UnsupportedTag(tag_str.to_string())),
    }
}

/// An entry map holding only the `"_t"` discriminator for `tag`.
pub(crate) fn tag_map(tag: DiffTag) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(TAG_KEY.to_string(), Value::String(tag.as_char().to_string()));
    map
}

/// An empty diff object tagged with `tag`.
pub fn tagged(tag: DiffTag) -> Value {
    Value::Object(tag_map(tag))
}

/// The `X` marker: instructs the object applier to remove the addressed key.
pub fn delete_marker() -> Value {
    tagged(DiffTag::Delete)
}

/// The `U` marker: the two inputs were equal.
pub fn unchanged() -> Value {
    tagged(DiffTag::Unchanged)
}

/// Number of entries in `map` other than the `"_t"` tag itself.
pub(crate) fn entry_count(map: &Map<String, Value>) -> usize {
    map.len() - usize::from(map.contains_key(TAG_KEY))
}
