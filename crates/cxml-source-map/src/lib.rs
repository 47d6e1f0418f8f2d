//! Source locations for cxml.
//!
//! Every node built by `cxml-tree` carries a [`SourceInfo`] pointing back
//! into the text it was parsed from. Diagnostics use these locations, together
//! with a [`SourceContext`] holding the text itself, to show where in a
//! document a problem was found.
//!
//! # Example
//!
//! ```rust
//! use cxml_source_map::*;
//!
//! let mut ctx = SourceContext::new();
//! let file_id = ctx.add_file("a.xml".into(), "<A>\n  <B/>\n</A>".into());
//!
//! let index = &ctx.get_file(file_id).unwrap().line_index;
//! let info = SourceInfo::from_offsets(file_id, 6, 10, index);
//!
//! assert_eq!(info.range.start.row, 1);
//! assert_eq!(info.range.start.column, 2);
//! ```

pub mod context;
pub mod line_index;
pub mod source_info;
pub mod types;

pub use context::{SourceContext, SourceFile};
pub use line_index::LineIndex;
pub use source_info::SourceInfo;
pub use types::{FileId, Location, Range};
