//! Builder API for diagnostic messages.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
use cxml_source_map::SourceInfo;

/// Builder for [`DiagnosticMessage`].
///
/// ```
/// use cxml_error_reporting::DiagnosticMessageBuilder;
///
/// let msg = DiagnosticMessageBuilder::error("Duplicate XML Tag")
///     .with_code("CX-2-6")
///     .problem("<F> appears 2 times in <A>")
///     .add_hint("Remove the extra <F> elements?")
///     .build();
///
/// assert_eq!(msg.code.as_deref(), Some("CX-2-6"));
/// assert_eq!(msg.hints.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    message: DiagnosticMessage,
}

impl DiagnosticMessageBuilder {
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            message: DiagnosticMessage::new(kind, title),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.message.code = Some(code.into());
        self
    }

    /// The problem statement: what went wrong.
    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.message.problem = Some(problem.into());
        self
    }

    pub fn add_detail(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Error, content.into(), None)
    }

    /// Add an error detail pointing at its own source location.
    pub fn add_detail_at(self, content: impl Into<String>, location: SourceInfo) -> Self {
        self.push_detail(DetailKind::Error, content.into(), Some(location))
    }

    pub fn add_info(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Info, content.into(), None)
    }

    pub fn add_note(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Note, content.into(), None)
    }

    pub fn add_hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn with_location(mut self, location: SourceInfo) -> Self {
        self.message.location = Some(location);
        self
    }

    pub fn build(self) -> DiagnosticMessage {
        self.message
    }

    fn push_detail(mut self, kind: DetailKind, content: String, location: Option<SourceInfo>) -> Self {
        self.message.details.push(DetailItem {
            kind,
            content,
            location,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxml_source_map::{FileId, LineIndex};

    #[test]
    fn test_builder_collects_details_in_order() {
        let msg = DiagnosticMessageBuilder::warning("Lenient conversion")
            .add_note("first")
            .add_detail("second")
            .add_info("third")
            .build();

        assert_eq!(msg.kind, DiagnosticKind::Warning);
        let kinds: Vec<DetailKind> = msg.details.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DetailKind::Note, DetailKind::Error, DetailKind::Info]
        );
    }

    #[test]
    fn test_detail_with_location() {
        let index = LineIndex::new("<A><B/><B/></A>");
        let second = SourceInfo::from_offsets(FileId(0), 7, 11, &index);

        let msg = DiagnosticMessageBuilder::error("Duplicate XML Tag")
            .add_detail_at("second <B> here", second.clone())
            .build();

        assert_eq!(msg.details[0].location, Some(second));
        assert!(msg.location.is_none());
    }
}
