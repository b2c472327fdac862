//! Slash-delimited path resolution into JSON values.
//!
//! Diff paths address through several nesting levels without materializing
//! intermediate wrapper objects; the resolver descends every segment except
//! the last and leaves the final segment to the caller, which interprets it
//! as a field name, single index, or `start:end` range depending on the
//! patch kind being applied.

use serde_json::Value;

use crate::error::DeltaError;

/// A parsed final path segment for range-aware appliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentRange {
    /// A single index, `"i"`.
    Index(usize),
    /// A half-open range, `"start:end"`.
    Range(usize, usize),
}

/// Resolve `path` against `root`, returning the container holding the
/// final segment together with the final segment itself, still unparsed.
///
/// Non-final segments descend through object fields (missing field is
/// `PathNotFound`) or array elements (out-of-bounds index is
/// `IndexOutOfRange`); hitting a scalar mid-path is `NotContainer`.
pub(crate) fn resolve<'a>(
    root: &'a mut Value,
    path: &'a str,
) -> Result<(&'a mut Value, &'a str), DeltaError> {
    let mut current = root;
    let mut rest = path;
    while let Some(sep) = rest.find('/') {
        let (segment, tail) = (&rest[..sep], &rest[sep + 1..]);
        current = match current {
            Value::Object(map) => map
                .get_mut(segment)
                .ok_or_else(|| DeltaError::PathNotFound(segment.to_string()))?,
            Value::Array(items) => {
                let index = parse_index(segment)?;
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or_else(|| DeltaError::IndexOutOfRange(format!("{index} >= {len}")))?
            }
            _ => return Err(DeltaError::NotContainer(segment.to_string())),
        };
        rest = tail;
    }
    Ok((current, rest))
}

/// Parse a numeric path segment.
pub(crate) fn parse_index(segment: &str) -> Result<usize, DeltaError> {
    segment
        .parse::<usize>()
        .map_err(|_| DeltaError::ParseError(segment.to_string()))
}

/// Parse a final segment as a single index or a half-open `start:end`
/// range. Both forms are accepted on apply even though the differ emits a
/// bare index when exactly one unit changed.
pub(crate) fn parse_segment_range(segment: &str) -> Result<SegmentRange, DeltaError> {
    match segment.split_once(':') {
        None => Ok(SegmentRange::Index(parse_index(segment)?)),
        Some((start, end)) => {
            let (start, end) = (parse_index(start)?, parse_index(end)?);
            if start > end {
                return Err(DeltaError::ParseError(segment.to_string()));
            }
            Ok(SegmentRange::Range(start, end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_bare_key_against_root() {
        let mut value = json!({"a": 1});
        let (container, last) = resolve(&mut value, "a").unwrap();
        assert_eq!(*container, json!({"a": 1}));
        assert_eq!(last, "a");
    }

    #[test]
    fn resolves_through_objects_and_arrays() {
        let mut value = json!({"a": {"b": [10, 20, 30]}});
        let (container, last) = resolve(&mut value, "a/b/2").unwrap();
        assert_eq!(*container, json!([10, 20, 30]));
        assert_eq!(last, "2");
    }

    #[test]
    fn missing_field_is_path_not_found() {
        let mut value = json!({"a": {}});
        assert_eq!(
            resolve(&mut value, "a/b/c"),
            Err(DeltaError::PathNotFound("b".to_string()))
        );
    }

    #[test]
    fn bad_array_index_errors() {
        let mut value = json!({"a": [1]});
        assert!(matches!(
            resolve(&mut value, "a/5/x"),
            Err(DeltaError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            resolve(&mut value, "a/no/x"),
            Err(DeltaError::ParseError(_))
        ));
    }

    #[test]
    fn scalar_mid_path_is_not_container() {
        let mut value = json!({"a": 1});
        assert_eq!(
            resolve(&mut value, "a/b/c"),
            Err(DeltaError::NotContainer("b".to_string()))
        );
        // A scalar in final position is fine; the applier decides.
        let (container, last) = resolve(&mut value, "a/b").unwrap();
        assert_eq!(*container, json!(1));
        assert_eq!(last, "b");
    }

    #[test]
    fn final_segment_parses_as_index_or_range() {
        assert_eq!(parse_segment_range("3"), Ok(SegmentRange::Index(3)));
        assert_eq!(parse_segment_range("2:5"), Ok(SegmentRange::Range(2, 5)));
        assert_eq!(parse_segment_range("4:4"), Ok(SegmentRange::Range(4, 4)));
        assert!(matches!(
            parse_segment_range("5:2"),
            Err(DeltaError::ParseError(_))
        ));
        assert!(matches!(
            parse_segment_range("x:2"),
            Err(DeltaError::ParseError(_))
        ));
    }
}
