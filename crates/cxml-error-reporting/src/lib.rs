//! Diagnostic messages for cxml.
//!
//! Errors from the parser and from strict document access are converted to a
//! [`DiagnosticMessage`]: a code, a title, a problem statement, bulleted
//! details and hints, and an optional source location. Messages render as
//! plain text (with an [`ariadne`] source snippet when the source is
//! available) or as JSON.
//!
//! ```rust
//! use cxml_error_reporting::DiagnosticMessageBuilder;
//!
//! let msg = DiagnosticMessageBuilder::error("Missing XML Tag")
//!     .with_code("CX-2-5")
//!     .problem("Element <A> requires child <B>")
//!     .add_hint("Add a <B> element?")
//!     .build();
//!
//! let text = msg.to_text(None);
//! assert!(text.starts_with("Error [CX-2-5]: Missing XML Tag"));
//! ```

pub mod builder;
pub mod catalog;
pub mod diagnostic;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_error_info, get_subsystem};
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
