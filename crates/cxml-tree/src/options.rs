//! Parse options.

use serde::{Deserialize, Serialize};

/// Default limit on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling how a source is turned into a tree.
///
/// Deserializable so that callers can keep them in their own configuration
/// files; every field has a default.
///
/// ```rust
/// use cxml_tree::ParseOptions;
///
/// let options: ParseOptions = serde_json::from_str(r#"{ "keep-comments": false }"#).unwrap();
/// assert!(!options.keep_comments);
/// assert_eq!(options.max_depth, cxml_tree::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    /// Deepest element nesting accepted before parsing fails.
    pub max_depth: usize,

    /// Keep comment nodes in the tree.
    pub keep_comments: bool,

    /// Keep text nodes that contain only whitespace.
    pub keep_whitespace_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            keep_comments: true,
            keep_whitespace_text: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    pub fn with_whitespace_text(mut self, keep: bool) -> Self {
        self.keep_whitespace_text = keep;
        self
    }
}
