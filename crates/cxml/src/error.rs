//! Errors raised while reading and navigating documents.

use cxml_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder, get_error_info};
use cxml_source_map::SourceInfo;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from [`crate::Document`] and [`crate::Node`] operations.
#[derive(Debug, Error)]
pub enum Error {
    /// `read_file` was given a path that does not exist.
    #[error("XML file {} not found", path.display())]
    SourceNotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("could not read XML file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser rejected the source.
    #[error(transparent)]
    Parse(#[from] cxml_tree::Error),

    #[error("unrecognised root node {found} (expected {expected})")]
    UnrecognisedRoot {
        expected: String,
        found: String,
        location: SourceInfo,
    },

    /// The node is not bound to an element.
    #[error("no XML node position")]
    NoPosition,

    /// A required unique child is absent. `location` is the parent's.
    #[error("missing XML tag {name} in {parent}")]
    MissingTag {
        parent: String,
        name: String,
        location: SourceInfo,
    },

    /// More than one match where at most one is allowed. `location` is the
    /// second match.
    #[error("duplicate XML tag {name} in {parent}")]
    DuplicateTag {
        parent: String,
        name: String,
        location: SourceInfo,
    },

    /// A required attribute is absent, or the node has no element.
    #[error("missing XML attribute {name}{}", in_element(.element))]
    MissingAttribute {
        element: Option<String>,
        name: String,
        location: Option<SourceInfo>,
    },

    /// `done()` found a child element that was never taken or ignored.
    #[error("unexpected XML node {name} in {parent}")]
    UnexpectedTag {
        parent: String,
        name: String,
        location: SourceInfo,
    },

    #[error("XML document has already been read")]
    AlreadyParsed,
}

/// Result type for cxml operations.
pub type Result<T> = std::result::Result<T, Error>;

fn in_element(element: &Option<String>) -> String {
    match element {
        Some(element) => format!(" in {}", element),
        None => String::new(),
    }
}

/// Start a diagnostic with the title the catalog gives `code`.
fn catalog_error(code: &str) -> DiagnosticMessageBuilder {
    let title = get_error_info(code).map_or(code, |info| info.title.as_str());
    DiagnosticMessageBuilder::error(title).with_code(code)
}

impl Error {
    /// Source location of the error, if it has one.
    pub fn location(&self) -> Option<&SourceInfo> {
        match self {
            Error::Parse(err) => err.location(),
            Error::UnrecognisedRoot { location, .. }
            | Error::MissingTag { location, .. }
            | Error::DuplicateTag { location, .. }
            | Error::UnexpectedTag { location, .. } => Some(location),
            Error::MissingAttribute { location, .. } => location.as_ref(),
            Error::SourceNotFound { .. }
            | Error::Read { .. }
            | Error::NoPosition
            | Error::AlreadyParsed => None,
        }
    }

    /// Convert this error to a DiagnosticMessage.
    ///
    /// Parser errors keep their `CX-1-*` code; everything else is `CX-2-*`.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        let builder = match self {
            Error::Parse(err) => return err.to_diagnostic(),

            Error::SourceNotFound { path } => catalog_error("CX-2-1")
                .problem(format!("There is no file at `{}`", path.display()))
                .add_hint("Check the path and the working directory?"),

            Error::Read { path, source } => catalog_error("CX-2-2")
                .problem(format!("`{}` exists but could not be read", path.display()))
                .add_detail(source.to_string()),

            Error::UnrecognisedRoot {
                expected, found, ..
            } => catalog_error("CX-2-3")
                .problem(format!(
                    "Expected a <{}> document, found a <{}> root element",
                    expected, found
                ))
                .add_hint(format!("Is this file a <{}> document?", expected)),

            Error::NoPosition => catalog_error("CX-2-4")
                .problem("This node does not refer to an element of a parsed document")
                .add_hint("Read the document before navigating it?"),

            Error::MissingTag { parent, name, .. } => catalog_error("CX-2-5")
                .problem(format!("<{}> requires a <{}> child", parent, name))
                .add_hint(format!("Add a <{}> element to <{}>?", name, parent)),

            Error::DuplicateTag { parent, name, .. } => catalog_error("CX-2-6")
                .problem(format!("<{}> may appear at most once in <{}>", name, parent))
                .add_info(format!("This is the second <{}>", name))
                .add_hint(format!("Remove the extra <{}> elements?", name)),

            Error::MissingAttribute { element, name, .. } => {
                let builder = catalog_error("CX-2-7");
                match element {
                    Some(element) => builder
                        .problem(format!("<{}> requires a `{}` attribute", element, name))
                        .add_hint(format!("Add {}=\"...\" to <{}>?", name, element)),
                    None => builder
                        .problem(format!("No element to read the `{}` attribute from", name)),
                }
            }

            Error::UnexpectedTag { parent, name, .. } => catalog_error("CX-2-8")
                .problem(format!("<{}> is not expected in <{}>", name, parent))
                .add_hint(format!("Check the spelling of <{}>, or remove it?", name)),

            Error::AlreadyParsed => catalog_error("CX-2-9")
                .problem("A document can only be read once")
                .add_hint("Create a new Document for each source?"),
        };

        match self.location() {
            Some(location) => builder.with_location(location.clone()).build(),
            None => builder.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_tag() -> Error {
        Error::MissingTag {
            parent: "A".to_string(),
            name: "B".to_string(),
            location: SourceInfo::default(),
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(missing_tag().to_string(), "missing XML tag B in A");

        let err = Error::MissingAttribute {
            element: Some("A".to_string()),
            name: "id".to_string(),
            location: None,
        };
        assert_eq!(err.to_string(), "missing XML attribute id in A");

        let err = Error::MissingAttribute {
            element: None,
            name: "id".to_string(),
            location: None,
        };
        assert_eq!(err.to_string(), "missing XML attribute id");
    }

    #[test]
    fn test_parse_error_keeps_its_code() {
        let err = Error::from(cxml_tree::Error::EmptyDocument);
        assert_eq!(err.to_string(), "Empty XML document: no root element found");
        assert_eq!(err.to_diagnostic().code.as_deref(), Some("CX-1-5"));
    }

    #[test]
    fn test_diagnostic_titles_come_from_catalog() {
        let diagnostic = missing_tag().to_diagnostic();
        assert_eq!(diagnostic.code.as_deref(), Some("CX-2-5"));
        assert_eq!(diagnostic.title, "Missing XML Tag");
        assert_eq!(diagnostic.location, Some(SourceInfo::default()));

        let diagnostic = Error::NoPosition.to_diagnostic();
        assert_eq!(diagnostic.title, "No Document Position");
        assert!(diagnostic.location.is_none());
    }

    #[test]
    fn test_read_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::Read {
            path: PathBuf::from("a.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert_eq!(err.to_diagnostic().details[0].content, "denied");
    }
}
