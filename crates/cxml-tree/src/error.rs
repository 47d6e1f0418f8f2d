//! Error types for XML parsing with source locations.

use cxml_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use cxml_source_map::SourceInfo;
use std::fmt;

/// Result type alias for cxml-tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during XML parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// XML syntax error from quick-xml.
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// Unexpected end of input.
    UnexpectedEof {
        /// What was expected when EOF was encountered.
        expected: String,
        location: Option<SourceInfo>,
    },

    /// Mismatched end tag.
    MismatchedEndTag {
        expected: String,
        found: String,
        location: Option<SourceInfo>,
    },

    /// Invalid XML structure.
    InvalidStructure {
        message: String,
        location: Option<SourceInfo>,
    },

    /// Empty document (no root element).
    EmptyDocument,

    /// Multiple root elements.
    MultipleRoots { location: Option<SourceInfo> },

    /// Elements nested deeper than `ParseOptions::max_depth`.
    TooDeep {
        max_depth: usize,
        location: Option<SourceInfo>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::XmlSyntax { message, position } => {
                write!(f, "XML syntax error: {}", message)?;
                if let Some(pos) = position {
                    write!(f, " at byte {}", pos)?;
                }
                Ok(())
            }
            Error::UnexpectedEof { expected, .. } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            Error::MismatchedEndTag {
                expected, found, ..
            } => {
                write!(
                    f,
                    "Mismatched end tag: expected </{}>, found </{}>",
                    expected, found
                )
            }
            Error::InvalidStructure { message, .. } => {
                write!(f, "Invalid XML structure: {}", message)
            }
            Error::EmptyDocument => {
                write!(f, "Empty XML document: no root element found")
            }
            Error::MultipleRoots { .. } => {
                write!(f, "Invalid XML: multiple root elements")
            }
            Error::TooDeep { max_depth, .. } => {
                write!(f, "XML elements nested deeper than {} levels", max_depth)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Source location of the error, when the parser could pin one down.
    pub fn location(&self) -> Option<&SourceInfo> {
        match self {
            Error::UnexpectedEof { location, .. }
            | Error::MismatchedEndTag { location, .. }
            | Error::InvalidStructure { location, .. }
            | Error::MultipleRoots { location }
            | Error::TooDeep { location, .. } => location.as_ref(),
            Error::XmlSyntax { .. } | Error::EmptyDocument => None,
        }
    }

    /// Convert this error to a DiagnosticMessage with the matching CX-1-* code.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        let builder = match self {
            Error::XmlSyntax { message, position } => {
                let mut builder = DiagnosticMessageBuilder::error("XML Syntax Error")
                    .with_code("CX-1-1")
                    .problem(message.clone());

                if let Some(pos) = position {
                    builder = builder.add_detail(format!("Error at byte offset {}", pos));
                }

                builder
            }

            Error::UnexpectedEof { expected, .. } => {
                DiagnosticMessageBuilder::error("Unexpected End of XML Input")
                    .with_code("CX-1-2")
                    .problem(format!(
                        "The XML document ended unexpectedly; expected {}",
                        expected
                    ))
            }

            Error::MismatchedEndTag {
                expected, found, ..
            } => DiagnosticMessageBuilder::error("Mismatched XML End Tag")
                .with_code("CX-1-3")
                .problem(format!(
                    "End tag </{}> does not match start tag <{}>",
                    found, expected
                ))
                .add_detail(format!("Expected: </{}>", expected))
                .add_detail(format!("Found: </{}>", found))
                .add_hint("Check that all opening tags have matching closing tags?"),

            Error::InvalidStructure { message, .. } => {
                DiagnosticMessageBuilder::error("Invalid XML Structure")
                    .with_code("CX-1-4")
                    .problem(message.clone())
            }

            Error::EmptyDocument => DiagnosticMessageBuilder::error("Empty XML Document")
                .with_code("CX-1-5")
                .problem("The XML document contains no root element")
                .add_hint("Add a root element to the document?"),

            Error::MultipleRoots { .. } => {
                DiagnosticMessageBuilder::error("Multiple XML Root Elements")
                    .with_code("CX-1-6")
                    .problem("The XML document contains multiple root elements")
                    .add_detail("XML documents must have exactly one root element")
                    .add_hint("Wrap multiple elements in a single container element?")
            }

            Error::TooDeep { max_depth, .. } => {
                DiagnosticMessageBuilder::error("XML Nesting Too Deep")
                    .with_code("CX-1-7")
                    .problem(format!(
                        "Elements are nested more than {} levels deep",
                        max_depth
                    ))
                    .add_hint("Raise `max-depth` in the parse options?")
            }
        };

        match self.location() {
            Some(loc) => builder.with_location(loc.clone()).build(),
            None => builder.build(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlSyntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}
