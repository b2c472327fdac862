//! Character-level string differ.
//!
//! Trims the longest common prefix and suffix, then either groups
//! substituted runs when the lengths match or emits one splice covering the
//! whole non-common middle when they do not.

use serde_json::{Map, Value};

use super::STRING_PRESERVE_MIN;
use crate::tag::{entry_count, tag_map, unchanged, DiffTag};

pub(super) fn diff_strings(old: &str, new: &str) -> Value {
    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();
    let old_len = old_chars.len();
    let new_len = new_chars.len();
    let min_len = old_len.min(new_len);

    let mut start = 0;
    while start < min_len && old_chars[start] == new_chars[start] {
        start += 1;
    }

    // Suffix trimming must not overlap the prefix region.
    let mut end = old_len;
    let mut new_end = new_len;
    while end > start && new_end > start && old_chars[end - 1] == new_chars[new_end - 1] {
        end -= 1;
        new_end -= 1;
    }

    let preserved = start + (old_len - end);
    if preserved < STRING_PRESERVE_MIN {
        return if old == new {
            unchanged()
        } else {
            Value::String(new.to_string())
        };
    }

    let mut entries = tag_map(DiffTag::PatchString);
    if old_len == new_len {
        // Pure substitution: group maximal runs of differing positions.
        // Any equal character closes the current run.
        let mut run_start = start;
        for i in start..end {
            if old_chars[i] == new_chars[i] {
                flush_run(&mut entries, &new_chars, run_start, i);
                run_start = i + 1;
            }
        }
        flush_run(&mut entries, &new_chars, run_start, end);
        if entry_count(&entries) == 0 {
            return unchanged();
        }
    } else {
        // Lengths shifted: one splice covering the whole middle.
        let middle: String = new_chars[start..new_end].iter().collect();
        entries.insert(format!("{start}:{end}"), Value::String(middle));
    }
    Value::Object(entries)
}

fn flush_run(entries: &mut Map<String, Value>, new_chars: &[char], run_start: usize, run_end: usize) {
    if run_end <= run_start {
        return;
    }
    let replacement: String = new_chars[run_start..run_end].iter().collect();
    let path = if run_end - run_start == 1 {
        run_start.to_string()
    } else {
        format!("{run_start}:{run_end}")
    };
    entries.insert(path, Value::String(replacement));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_strings_replace_below_threshold() {
        // Fewer than 20 preserved characters: not worth a patch.
        assert_eq!(diff_strings("hello world", "hello rust!"), json!("hello rust!"));
        assert_eq!(diff_strings("abc", "abd"), json!("abd"));
    }

    #[test]
    fn equal_strings_are_unchanged() {
        assert_eq!(diff_strings("same", "same"), json!({"_t": "U"}));
        let long = "a long enough string to clear the preserve threshold";
        assert_eq!(diff_strings(long, long), json!({"_t": "U"}));
    }

    #[test]
    fn single_char_substitution_uses_bare_index() {
        let old = "0123456789abcdefghij-0123456789";
        let new = "0123456789abcdefghij+0123456789";
        assert_eq!(diff_strings(old, new), json!({"_t": "S", "20": "+"}));
    }

    #[test]
    fn substitution_runs_are_grouped_by_equal_chars() {
        let old = "aaaaaaaaaaXXaaaaaaaaaaYaaaaaaaaaa";
        let new = "aaaaaaaaaaZZaaaaaaaaaaWaaaaaaaaaa";
        assert_eq!(
            diff_strings(old, new),
            json!({"_t": "S", "10:12": "ZZ", "22": "W"})
        );
    }

    #[test]
    fn length_shift_emits_single_splice() {
        let old = "the quick brown fox jumps over the lazy dog";
        let new = "the quick brown happy fox jumps over the lazy dog";
        let delta = diff_strings(old, new);
        let map = delta.as_object().unwrap();
        assert_eq!(map.get("_t"), Some(&json!("S")));
        assert_eq!(map.len(), 2, "exactly one splice path: {delta}");
    }
}
