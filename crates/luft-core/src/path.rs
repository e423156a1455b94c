//! # Value Paths
//!
//! A path locates a value inside a nested input: a sequence of object keys
//! and list indexes from the root. Paths travel with every [`Issue`] so a
//! client can point at the exact offending field.
//!
//! [`Issue`]: crate::Issue

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step into a nested value.
///
/// Serialized untagged: keys as JSON strings, indexes as JSON integers,
/// so a path reads `["users", 0, "email"]` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Render a path as `users[0].email`. The empty path renders as `(root)`.
pub fn render_path(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return "(root)".to_string();
    }
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                out.push_str(&format!("[{index}]"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_mixed_paths() {
        let path = vec![
            PathSegment::from("users"),
            PathSegment::from(0usize),
            PathSegment::from("email"),
        ];
        assert_eq!(render_path(&path), "users[0].email");
    }

    #[test]
    fn renders_root() {
        assert_eq!(render_path(&[]), "(root)");
    }

    #[test]
    fn leading_index_has_no_dot() {
        let path = vec![PathSegment::Index(2), PathSegment::from("id")];
        assert_eq!(render_path(&path), "[2].id");
    }

    #[test]
    fn serializes_untagged() {
        let path = vec![PathSegment::from("a"), PathSegment::Index(3)];
        assert_eq!(serde_json::to_string(&path).unwrap(), r#"["a",3]"#);
        let back: Vec<PathSegment> = serde_json::from_str(r#"["a",3]"#).unwrap();
        assert_eq!(back, path);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn segment() -> impl Strategy<Value = PathSegment> {
            prop_oneof![
                (0usize..1000).prop_map(PathSegment::Index),
                "[a-z][a-z0-9_]{0,8}".prop_map(PathSegment::Key),
            ]
        }

        proptest! {
            /// Every segment appears in order, and the rendering never
            /// starts or ends with a separator.
            #[test]
            fn rendering_keeps_every_segment(path in prop::collection::vec(segment(), 1..8)) {
                let rendered = render_path(&path);
                prop_assert!(!rendered.starts_with('.'));
                prop_assert!(!rendered.ends_with('.'));
                prop_assert!(!rendered.contains(".."));
                let mut rest = rendered.as_str();
                for segment in &path {
                    let piece = segment.to_string();
                    let at = rest.find(&piece);
                    prop_assert!(at.is_some(), "{} missing from {}", piece, rendered);
                    rest = &rest[at.unwrap_or(0) + piece.len()..];
                }
            }

            #[test]
            fn wire_form_reads_back(path in prop::collection::vec(segment(), 0..8)) {
                let wire = serde_json::to_string(&path).unwrap();
                let back: Vec<PathSegment> = serde_json::from_str(&wire).unwrap();
                prop_assert_eq!(back, path);
            }
        }
    }
}
