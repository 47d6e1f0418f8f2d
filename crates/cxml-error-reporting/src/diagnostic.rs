//! Core diagnostic message types.

use cxml_source_map::{SourceContext, SourceInfo};
use serde::{Deserialize, Serialize};

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// An error that prevents completion
    Error,
    /// A warning that doesn't prevent completion but indicates a problem
    Warning,
    /// Informational message
    Info,
}

impl DiagnosticKind {
    fn label(self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Warning => "Warning",
            DiagnosticKind::Info => "Info",
        }
    }
}

/// How detail items are presented (x/i bullet style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailKind {
    /// Error detail (✖ bullet)
    Error,
    /// Info detail (ℹ bullet)
    Info,
    /// Note detail (plain bullet)
    Note,
}

impl DetailKind {
    fn bullet(self) -> &'static str {
        match self {
            DetailKind::Error => "✖",
            DetailKind::Info => "ℹ",
            DetailKind::Note => "•",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            DetailKind::Error => "error",
            DetailKind::Info => "info",
            DetailKind::Note => "note",
        }
    }
}

/// A detail item in a diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    pub kind: DetailKind,
    pub content: String,
    /// Where in the source this detail applies, if anywhere in particular
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceInfo>,
}

/// A diagnostic message.
///
/// Structure:
/// 1. **Code**: optional error code (e.g. "CX-2-5")
/// 2. **Title**: brief error message
/// 3. **Kind**: error, warning, info
/// 4. **Problem**: what went wrong
/// 5. **Details**: specific information, as bullets
/// 6. **Hints**: optional guidance for fixing (ends with ?)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub title: String,

    pub kind: DiagnosticKind,

    pub problem: Option<String>,

    pub details: Vec<DetailItem>,

    pub hints: Vec<String>,

    /// Where in the source the problem was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceInfo>,
}

impl DiagnosticMessage {
    /// Create a new diagnostic message with just a title and kind.
    ///
    /// Prefer [`crate::DiagnosticMessageBuilder`] for anything with details.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            kind,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Render this message as text.
    ///
    /// Format:
    /// ```text
    /// Error [CX-2-5]: title at 3:5
    /// Problem statement here
    /// ✖ Error detail
    /// ℹ Info detail
    /// • Note detail
    /// ? Hint
    /// ```
    ///
    /// When `ctx` holds the text the location points into, an ariadne
    /// snippet replaces the title, problem and located details.
    pub fn to_text(&self, ctx: Option<&SourceContext>) -> String {
        let snippet = match (self.location.as_ref(), ctx) {
            (Some(location), Some(ctx)) => self.render_source_context(location, ctx),
            _ => None,
        };

        let mut lines = Vec::new();

        match snippet {
            Some(snippet) => {
                lines.push(snippet.trim_end().to_string());
                for detail in self.details.iter().filter(|d| d.location.is_none()) {
                    lines.push(format!("{} {}", detail.kind.bullet(), detail.content));
                }
            }
            None => {
                let mut heading = match &self.code {
                    Some(code) => format!("{} [{}]: {}", self.kind.label(), code, self.title),
                    None => format!("{}: {}", self.kind.label(), self.title),
                };
                if let Some(location) = &self.location {
                    heading.push_str(&format!(" at {}", location.display_position()));
                }
                lines.push(heading);

                if let Some(problem) = &self.problem {
                    lines.push(problem.clone());
                }
                for detail in &self.details {
                    lines.push(format!("{} {}", detail.kind.bullet(), detail.content));
                }
            }
        }

        for hint in &self.hints {
            lines.push(format!("? {}", hint));
        }

        lines.join("\n")
    }

    /// Render this message as a JSON value.
    ///
    /// ```
    /// use cxml_error_reporting::DiagnosticMessage;
    ///
    /// let json = DiagnosticMessage::error("Something went wrong").to_json();
    /// assert_eq!(json["kind"], "error");
    /// assert_eq!(json["title"], "Something went wrong");
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let mut obj = json!({
            "kind": self.kind.label().to_lowercase(),
            "title": self.title,
        });

        if let Some(code) = &self.code {
            obj["code"] = json!(code);
        }

        if let Some(problem) = &self.problem {
            obj["problem"] = json!(problem);
        }

        if !self.details.is_empty() {
            let details: Vec<_> = self
                .details
                .iter()
                .map(|d| {
                    let mut detail = json!({
                        "kind": d.kind.as_str(),
                        "content": d.content,
                    });
                    if let Some(location) = &d.location {
                        detail["location"] = json!(location);
                    }
                    detail
                })
                .collect();
            obj["details"] = json!(details);
        }

        if !self.hints.is_empty() {
            obj["hints"] = json!(self.hints);
        }

        if let Some(location) = &self.location {
            obj["location"] = json!(location);
        }

        obj
    }

    /// Render an ariadne snippet of the source around `location`.
    fn render_source_context(&self, location: &SourceInfo, ctx: &SourceContext) -> Option<String> {
        use ariadne::{Color, Config, Label, Report, ReportKind, Source};

        let file = ctx.get_file(location.file_id)?;
        let content = ctx.file_content(location.file_id)?;

        // ariadne spans count characters, SourceInfo counts bytes
        let to_char = |offset: usize| content.get(..offset).map(|s| s.chars().count());
        let start = to_char(location.start_offset())?;
        let end = to_char(location.end_offset())?.max(start);

        let (report_kind, color) = match self.kind {
            DiagnosticKind::Error => (ReportKind::Error, Color::Red),
            DiagnosticKind::Warning => (ReportKind::Warning, Color::Yellow),
            DiagnosticKind::Info => (ReportKind::Advice, Color::Cyan),
        };

        let mut report = Report::build(report_kind, file.path.clone(), start)
            .with_config(Config::default().with_color(false));

        if let Some(code) = &self.code {
            report = report.with_message(format!("[{}] {}", code, self.title));
        } else {
            report = report.with_message(&self.title);
        }

        let main_message = self.problem.as_deref().unwrap_or(&self.title);
        report = report.with_label(
            Label::new((file.path.clone(), start..end))
                .with_message(main_message)
                .with_color(color),
        );

        for detail in &self.details {
            let Some(detail_loc) = &detail.location else {
                continue;
            };
            if detail_loc.file_id != location.file_id {
                continue;
            }
            if let (Some(detail_start), Some(detail_end)) = (
                to_char(detail_loc.start_offset()),
                to_char(detail_loc.end_offset()),
            ) {
                report = report.with_label(
                    Label::new((file.path.clone(), detail_start..detail_end.max(detail_start)))
                        .with_message(&detail.content)
                        .with_color(Color::Blue),
                );
            }
        }

        let mut output = Vec::new();
        report
            .finish()
            .write((file.path.clone(), Source::from(content)), &mut output)
            .ok()?;

        String::from_utf8(output).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticMessageBuilder;
    use cxml_source_map::{FileId, LineIndex};

    #[test]
    fn test_diagnostic_message_new() {
        let msg = DiagnosticMessage::new(DiagnosticKind::Error, "Test error");
        assert_eq!(msg.title, "Test error");
        assert_eq!(msg.kind, DiagnosticKind::Error);
        assert!(msg.code.is_none());
        assert!(msg.problem.is_none());
        assert!(msg.details.is_empty());
        assert!(msg.hints.is_empty());
    }

    #[test]
    fn test_to_text_simple_error() {
        let msg = DiagnosticMessage::error("Something went wrong");
        assert_eq!(msg.to_text(None), "Error: Something went wrong");
    }

    #[test]
    fn test_to_text_with_code() {
        let msg = DiagnosticMessage::warning("Something odd").with_code("CX-1-1");
        assert_eq!(msg.to_text(None), "Warning [CX-1-1]: Something odd");
    }

    #[test]
    fn test_to_text_full_message() {
        let msg = DiagnosticMessageBuilder::error("Invalid input")
            .problem("Values must be numeric")
            .add_detail("Found text in <B>")
            .add_info("<B> holds a count")
            .add_note("Checked after parsing")
            .add_hint("Use digits only?")
            .build();

        let text = msg.to_text(None);
        assert!(text.contains("Error: Invalid input"));
        assert!(text.contains("Values must be numeric"));
        assert!(text.contains("✖ Found text in <B>"));
        assert!(text.contains("ℹ <B> holds a count"));
        assert!(text.contains("• Checked after parsing"));
        assert!(text.contains("? Use digits only?"));
    }

    #[test]
    fn test_location_without_context() {
        let index = LineIndex::new("<A>\n  <B/>\n</A>");
        let location = SourceInfo::from_offsets(FileId(0), 6, 10, &index);

        let msg = DiagnosticMessageBuilder::error("Unexpected XML Tag")
            .with_location(location)
            .build();

        assert_eq!(msg.to_text(None), "Error: Unexpected XML Tag at 2:3");
    }

    #[test]
    fn test_location_with_context() {
        let source = "<A>\n  <B/>\n</A>";
        let mut ctx = SourceContext::new();
        let file_id = ctx.add_file("a.xml".to_string(), source.to_string());
        let index = LineIndex::new(source);
        let location = SourceInfo::from_offsets(file_id, 6, 10, &index);

        let msg = DiagnosticMessageBuilder::error("Unexpected XML Tag")
            .with_code("CX-2-8")
            .problem("<B> was not expected in <A>")
            .add_detail("This note has no location")
            .add_hint("Remove <B>?")
            .with_location(location)
            .build();

        let text = msg.to_text(Some(&ctx));
        assert!(text.contains("a.xml"), "Got: {}", text);
        assert!(text.contains("[CX-2-8] Unexpected XML Tag"), "Got: {}", text);
        assert!(text.contains("<B> was not expected in <A>"), "Got: {}", text);
        assert!(text.contains("✖ This note has no location"), "Got: {}", text);
        assert!(text.contains("? Remove <B>?"), "Got: {}", text);
    }

    #[test]
    fn test_to_json_full_message() {
        let msg = DiagnosticMessageBuilder::error("Invalid input")
            .with_code("CX-2-5")
            .problem("Values must be numeric")
            .add_detail("Found text in <B>")
            .add_info("Expected numbers")
            .add_hint("Use digits only?")
            .build();

        let json = msg.to_json();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["title"], "Invalid input");
        assert_eq!(json["code"], "CX-2-5");
        assert_eq!(json["problem"], "Values must be numeric");
        assert_eq!(json["details"][0]["kind"], "error");
        assert_eq!(json["details"][0]["content"], "Found text in <B>");
        assert_eq!(json["details"][1]["kind"], "info");
        assert_eq!(json["hints"][0], "Use digits only?");
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_location_in_to_json() {
        let index = LineIndex::new("<A>\n  <B/>\n</A>");
        let location = SourceInfo::from_offsets(FileId(0), 6, 10, &index);
        let msg = DiagnosticMessageBuilder::error("Unexpected XML Tag")
            .with_location(location)
            .build();

        let json = msg.to_json();
        let range = &json["location"]["range"];
        assert_eq!(range["start"]["offset"], 6);
        assert_eq!(range["start"]["row"], 1);
        assert_eq!(range["start"]["column"], 2);
        assert_eq!(range["end"]["offset"], 10);
    }
}
