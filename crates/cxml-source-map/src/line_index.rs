//! Offset to row/column lookups

use crate::types::Location;
use serde::{Deserialize, Serialize};

/// Index of line starts in a piece of source text.
///
/// Built once per parsed source so that every node's byte offsets can be
/// turned into rows and columns with a binary search instead of a rescan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineIndex {
    /// Byte offsets of each newline character
    line_breaks: Vec<usize>,

    /// Total length of the text in bytes
    total_length: usize,
}

impl LineIndex {
    /// Scan `content` once and record where its lines break.
    ///
    /// ```
    /// use cxml_source_map::LineIndex;
    ///
    /// let index = LineIndex::new("<A>\n<B/>\n</A>");
    /// assert_eq!(index.line_count(), 3);
    /// ```
    pub fn new(content: &str) -> Self {
        let line_breaks = content
            .bytes()
            .enumerate()
            .filter_map(|(idx, byte)| (byte == b'\n').then_some(idx))
            .collect();

        LineIndex {
            line_breaks,
            total_length: content.len(),
        }
    }

    /// Convert a byte offset to a [`Location`].
    ///
    /// Returns `None` if the offset is past the end of the text. A newline
    /// belongs to the row it terminates.
    pub fn offset_to_location(&self, offset: usize) -> Option<Location> {
        if offset > self.total_length {
            return None;
        }

        let row = match self.line_breaks.binary_search(&offset) {
            Ok(idx) | Err(idx) => idx,
        };

        let line_start = if row == 0 {
            0
        } else {
            self.line_breaks[row - 1] + 1
        };

        Some(Location {
            offset,
            row,
            column: offset - line_start,
        })
    }

    /// Like [`offset_to_location`](Self::offset_to_location) but clamps
    /// out-of-range offsets to the end of the text.
    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.total_length);
        self.offset_to_location(offset).unwrap_or(Location {
            offset,
            row: 0,
            column: offset,
        })
    }

    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Number of lines; text without a newline has one line.
    pub fn line_count(&self) -> usize {
        self.line_breaks.len() + 1
    }
}
