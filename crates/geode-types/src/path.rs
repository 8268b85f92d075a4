//! Validation and manipulation of slash-separated tree paths.
//!
//! A tree path addresses an entry inside a tree hierarchy, e.g.
//! `"roads/highways/a42"`. Paths never start or end with `/`, never contain
//! empty segments, and the empty string denotes the tree root.
//!
//! Valid path segments:
//! - Must be non-empty
//! - Must not contain `/` (the separator), `:` (reserved for reference
//!   expressions), or control characters

use crate::error::TypeError;

/// The path separator character.
pub const SEPARATOR: char = '/';

/// Validate a non-empty tree path, returning `Ok(())` if well formed.
pub fn validate(path: &str) -> Result<(), TypeError> {
    if path.is_empty() {
        return Err(invalid(path, "path must not be empty"));
    }
    if path.starts_with(SEPARATOR) || path.ends_with(SEPARATOR) {
        return Err(invalid(path, "path must not start or end with '/'"));
    }
    for segment in path.split(SEPARATOR) {
        if segment.is_empty() {
            return Err(invalid(path, "path segments must not be empty"));
        }
        if segment.contains(':') {
            return Err(invalid(path, "path segments must not contain ':'"));
        }
        if segment.chars().any(|c| c.is_control()) {
            return Err(invalid(path, "path segments must not contain control characters"));
        }
    }
    Ok(())
}

fn invalid(path: &str, reason: &str) -> TypeError {
    TypeError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// The parent of `path`, or `""` if `path` is a single segment.
pub fn parent(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// The final segment of `path` (the entry's own name).
pub fn name(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Join a parent path and a child name. An empty parent yields the child.
pub fn append(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}{SEPARATOR}{child}")
    }
}

/// Depth of a path: number of segments, with the root at depth zero.
pub fn depth(path: &str) -> usize {
    if path.is_empty() {
        0
    } else {
        path.split(SEPARATOR).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_segment() {
        validate("roads").unwrap();
    }

    #[test]
    fn accepts_nested_path() {
        validate("roads/highways/a42").unwrap();
    }

    #[test]
    fn rejects_empty() {
        assert!(validate("").is_err());
    }

    #[test]
    fn rejects_leading_and_trailing_slash() {
        assert!(validate("/roads").is_err());
        assert!(validate("roads/").is_err());
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(validate("roads//highways").is_err());
    }

    #[test]
    fn rejects_colon() {
        assert!(validate("roads:main").is_err());
    }

    #[test]
    fn rejects_control_characters() {
        assert!(validate("roads\nhighways").is_err());
    }

    #[test]
    fn parent_of_nested_path() {
        assert_eq!(parent("a/b/c"), "a/b");
        assert_eq!(parent("a/b"), "a");
    }

    #[test]
    fn parent_of_single_segment_is_root() {
        assert_eq!(parent("a"), "");
    }

    #[test]
    fn name_is_final_segment() {
        assert_eq!(name("a/b/c"), "c");
        assert_eq!(name("a"), "a");
    }

    #[test]
    fn append_handles_root_parent() {
        assert_eq!(append("", "roads"), "roads");
        assert_eq!(append("roads", "highways"), "roads/highways");
    }

    #[test]
    fn depth_counts_segments() {
        assert_eq!(depth(""), 0);
        assert_eq!(depth("a"), 1);
        assert_eq!(depth("a/b/c"), 3);
    }

    proptest::proptest! {
        #[test]
        fn append_then_split_roundtrip(
            parent_path in "[a-z]{1,8}(/[a-z]{1,8}){0,3}",
            child in "[a-z]{1,8}",
        ) {
            let joined = append(&parent_path, &child);
            proptest::prop_assert_eq!(parent(&joined), parent_path);
            proptest::prop_assert_eq!(name(&joined), child);
        }
    }
}
