//! Source-tracked XML trees.
//!
//! This crate turns XML text into an [`XmlDocument`]: elements, text, CDATA
//! and comments in document order, with namespace prefixes resolved and a
//! [`SourceInfo`] on every node so later stages can point back at the input.
//!
//! # Example
//!
//! ```rust
//! use cxml_tree::{parse, XmlNode};
//!
//! let xml = parse(r#"<config><item id="1">hello</item></config>"#).unwrap();
//!
//! let item = xml.root.get_children("item")[0];
//! assert_eq!(item.get_attribute("id"), Some("1"));
//! assert!(matches!(&item.children[0], XmlNode::Text { content, .. } if content == "hello"));
//! ```
//!
//! DTDs, processing instructions and the XML declaration are read past and
//! not represented in the tree.

pub mod error;
pub mod options;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use options::{DEFAULT_MAX_DEPTH, ParseOptions};
pub use parser::{XML_NAMESPACE, parse, parse_with, parse_with_file_id, parse_with_options};
pub use types::{NodeKind, XmlAttribute, XmlDocument, XmlElement, XmlNode};

// Re-export source map types for convenience
pub use cxml_source_map::{FileId, SourceInfo};
