//! Source context for managing parsed sources

use crate::line_index::LineIndex;
use crate::types::FileId;
use serde::{Deserialize, Serialize};

/// The sources a set of [`crate::SourceInfo`] values point into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceContext {
    files: Vec<SourceFile>,
}

/// A registered source with its text and line index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// File path, or a placeholder such as `<string>` for in-memory input
    pub path: String,
    pub content: String,
    pub line_index: LineIndex,
}

impl SourceContext {
    pub fn new() -> Self {
        SourceContext { files: Vec::new() }
    }

    /// Register a source and return its id. Ids are handed out in
    /// registration order.
    pub fn add_file(&mut self, path: String, content: String) -> FileId {
        let id = FileId(self.files.len());
        let line_index = LineIndex::new(&content);

        self.files.push(SourceFile {
            path,
            content,
            line_index,
        });
        id
    }

    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    /// Text of a registered source.
    pub fn file_content(&self, id: FileId) -> Option<&str> {
        self.get_file(id).map(|file| file.content.as_str())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
