//! Source information attached to parsed nodes

use crate::line_index::LineIndex;
use crate::types::{FileId, Location, Range};
use serde::{Deserialize, Serialize};

/// Where a piece of a document came from: a source and a range within it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceInfo {
    /// The source this range belongs to
    pub file_id: FileId,
    /// The range within that source
    pub range: Range,
}

impl SourceInfo {
    /// Create source info for a range in a source.
    pub fn original(file_id: FileId, range: Range) -> Self {
        SourceInfo { file_id, range }
    }

    /// Create source info from byte offsets, resolving rows and columns
    /// through `index`.
    pub fn from_offsets(file_id: FileId, start: usize, end: usize, index: &LineIndex) -> Self {
        SourceInfo {
            file_id,
            range: Range {
                start: index.location(start),
                end: index.location(end),
            },
        }
    }

    pub fn start_offset(&self) -> usize {
        self.range.start.offset
    }

    pub fn end_offset(&self) -> usize {
        self.range.end.offset
    }

    pub fn start(&self) -> Location {
        self.range.start
    }

    /// 1-indexed `row:column` of the start, for messages.
    pub fn display_position(&self) -> String {
        format!("{}:{}", self.range.start.row + 1, self.range.start.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_offsets() {
        let index = LineIndex::new("<A>\n  <B>42</B>\n</A>");
        let info = SourceInfo::from_offsets(FileId(3), 6, 15, &index);

        assert_eq!(info.file_id, FileId(3));
        assert_eq!(info.start_offset(), 6);
        assert_eq!(info.end_offset(), 15);
        assert_eq!(info.start().row, 1);
        assert_eq!(info.start().column, 2);
        assert_eq!(info.display_position(), "2:3");
    }

    #[test]
    fn test_source_info_serialization() {
        let index = LineIndex::new("<root/>");
        let info = SourceInfo::from_offsets(FileId(0), 0, 7, &index);

        let json = serde_json::to_string(&info).unwrap();
        let back: SourceInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info, back);
    }
}
