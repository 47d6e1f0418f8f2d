//! Strict, self-validating typed access to XML documents.
//!
//! Code that reads an XML document with this crate asks for children and
//! attributes by name and type ("the single `<Duration>` child, as a
//! number"), and finishes each element with [`Node::done`], which fails if
//! the element has a child that was never asked for. Reading a document
//! this way checks its shape as a side effect, without a separate schema.
//!
//! # Example
//!
//! ```rust
//! use cxml::{Document, Error};
//!
//! let mut doc = Document::with_root_name("Reel");
//! doc.read_string(
//!     r#"<Reel id="r1">
//!          <Duration>1 440</Duration>
//!          <Asset>a.mxf</Asset>
//!          <Asset>b.mxf</Asset>
//!          <Note>kept for later</Note>
//!        </Reel>"#,
//! )
//! .unwrap();
//!
//! assert_eq!(doc.string_attribute("id").unwrap(), "r1");
//! assert_eq!(doc.number_child::<u32>("Duration").unwrap(), 1440);
//!
//! let assets: Vec<String> = doc
//!     .node_children("Asset")
//!     .unwrap()
//!     .iter()
//!     .map(|asset| asset.content().unwrap())
//!     .collect();
//! assert_eq!(assets, ["a.mxf", "b.mxf"]);
//!
//! // <Note> has not been read or ignored
//! assert!(matches!(doc.done(), Err(Error::UnexpectedTag { .. })));
//!
//! doc.ignore_child("Note");
//! doc.done().unwrap();
//! ```
//!
//! Parsing itself is done by [`cxml_tree`]; errors from either layer convert
//! to a [`cxml_error_reporting::DiagnosticMessage`] with
//! [`Error::to_diagnostic`].

mod convert;
pub mod document;
pub mod error;
pub mod node;

pub use convert::{ATTRIBUTE_TRUE_VALUES, CHILD_TRUE_VALUES, parse_number};
pub use document::Document;
pub use error::{Error, Result};
pub use node::Node;

pub use cxml_source_map::{SourceContext, SourceInfo};
pub use cxml_tree::{ParseOptions, XmlDocument, XmlElement};
