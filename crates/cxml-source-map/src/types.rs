//! Core types for source locations

use serde::{Deserialize, Serialize};

/// A unique identifier for a source registered in a [`crate::SourceContext`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub usize);

/// A location in source text (0-indexed)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Location {
    /// Byte offset from start of source
    pub offset: usize,
    /// Row number (0-indexed)
    pub row: usize,
    /// Column number (0-indexed, in bytes from the start of the row)
    pub column: usize,
}

/// A range in source text from start to end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Start location (inclusive)
    pub start: Location,
    /// End location (exclusive)
    pub end: Location,
}

impl Range {
    /// Length of the range in bytes.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_ordering() {
        let first = Location {
            offset: 0,
            row: 0,
            column: 0,
        };
        let second = Location {
            offset: 5,
            row: 0,
            column: 5,
        };
        let third = Location {
            offset: 10,
            row: 1,
            column: 0,
        };

        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn test_range_len() {
        let range = Range {
            start: Location {
                offset: 3,
                row: 0,
                column: 3,
            },
            end: Location {
                offset: 10,
                row: 0,
                column: 10,
            },
        };
        assert_eq!(range.len(), 7);
        assert!(!range.is_empty());
        assert!(Range::default().is_empty());
    }
}
