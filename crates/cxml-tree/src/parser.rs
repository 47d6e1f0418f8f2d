//! XML parser that builds [`XmlDocument`] trees.

use crate::{Error, ParseOptions, Result, XmlAttribute, XmlDocument, XmlElement, XmlNode};
use cxml_source_map::{FileId, LineIndex, SourceInfo};
use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

/// The namespace the `xml` prefix is always bound to.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse XML from a string with default options.
///
/// ```rust
/// use cxml_tree::parse;
///
/// let xml = parse("<root><child/></root>").unwrap();
/// assert_eq!(xml.root.name, "root");
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed.
pub fn parse(content: &str) -> Result<XmlDocument> {
    parse_with(content, FileId(0), &ParseOptions::default())
}

/// Parse XML from a string with the given options.
pub fn parse_with_options(content: &str, options: &ParseOptions) -> Result<XmlDocument> {
    parse_with(content, FileId(0), options)
}

/// Parse XML from a string whose locations should point at `file_id`.
pub fn parse_with_file_id(content: &str, file_id: FileId) -> Result<XmlDocument> {
    parse_with(content, file_id, &ParseOptions::default())
}

/// Parse XML with an explicit file id and options.
pub fn parse_with(content: &str, file_id: FileId, options: &ParseOptions) -> Result<XmlDocument> {
    tracing::trace!(bytes = content.len(), file_id = file_id.0, "Parsing XML");
    let mut parser = XmlParser::new(content, file_id, options);
    let document = parser.parse()?;
    tracing::trace!(root = %document.root.name, "Parsed XML");
    Ok(document)
}

/// Internal parser state.
struct XmlParser<'a> {
    /// The source content being parsed.
    source: &'a str,

    reader: Reader<&'a [u8]>,

    file_id: FileId,

    /// Row/column lookup for `source`.
    line_index: LineIndex,

    options: &'a ParseOptions,

    /// Stack of elements being built.
    stack: Vec<BuildNode>,
}

/// An element being constructed during parsing.
struct BuildNode {
    name: String,
    name_source: SourceInfo,
    prefix: Option<String>,
    namespace: Option<String>,

    /// Namespace declarations made on this element, `""` for the default namespace.
    namespaces: Vec<(String, String)>,

    attributes: Vec<XmlAttribute>,

    /// Byte offset of the `<` that opened this element.
    start_offset: usize,

    children: Vec<XmlNode>,
}

impl BuildNode {
    fn finish(self, source_info: SourceInfo) -> XmlElement {
        XmlElement {
            name: self.name,
            name_source: self.name_source,
            prefix: self.prefix,
            namespace: self.namespace,
            attributes: self.attributes,
            children: self.children,
            source_info,
        }
    }
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str, file_id: FileId, options: &'a ParseOptions) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            source,
            reader,
            file_id,
            line_index: LineIndex::new(source),
            options,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<XmlDocument> {
        let mut root: Option<XmlElement> = None;

        loop {
            // Capture position before reading the event
            let event_start = self.reader.buffer_position() as usize;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let node = self.open_element(&e, event_start)?;
                    self.stack.push(node);
                }
                Ok(Event::End(e)) => {
                    let element = self.handle_end(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Empty(e)) => {
                    let node = self.open_element(&e, event_start)?;
                    let end_offset = self.reader.buffer_position() as usize;
                    let element = node.finish(self.make_source_info(event_start, end_offset));
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    self.handle_text(&e, event_start)?;
                }
                Ok(Event::CData(e)) => {
                    self.handle_cdata(e, event_start)?;
                }
                Ok(Event::Comment(e)) => {
                    self.handle_comment(e, event_start);
                }
                Ok(Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {
                    // Not part of the tree
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position()),
                    });
                }
            }
        }

        if let Some(node) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", node.name),
                location: Some(node.name_source.clone()),
            });
        }

        let root = root.ok_or(Error::EmptyDocument)?;
        let doc_source_info = self.make_source_info(0, self.source.len());

        Ok(XmlDocument::new(root, doc_source_info))
    }

    /// Add a finished element to its parent, or make it the root.
    fn attach(&mut self, element: XmlElement, root: &mut Option<XmlElement>) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(XmlNode::Element(element));
                Ok(())
            }
            None if root.is_some() => Err(Error::MultipleRoots {
                location: Some(element.source_info),
            }),
            None => {
                *root = Some(element);
                Ok(())
            }
        }
    }

    fn open_element(&self, e: &BytesStart<'_>, event_start: usize) -> Result<BuildNode> {
        let raw_name = e.name();
        let (name, prefix) = split_name(&String::from_utf8_lossy(raw_name.as_ref()));
        let name_start = event_start + 1; // Skip '<'
        let name_end = name_start + raw_name.as_ref().len();
        let name_source = self.make_source_info(name_start, name_end);

        if self.stack.len() >= self.options.max_depth {
            return Err(Error::TooDeep {
                max_depth: self.options.max_depth,
                location: Some(name_source),
            });
        }

        let (attributes, namespaces) = self.parse_attributes(e, event_start)?;
        let namespace = self.resolve_namespace(prefix.as_deref(), &namespaces);

        Ok(BuildNode {
            name,
            name_source,
            prefix,
            namespace,
            namespaces,
            attributes,
            start_offset: event_start,
            children: Vec::new(),
        })
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>) -> Result<XmlElement> {
        let end_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let (end_local_name, _) = split_name(&end_name);

        let node = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", end_name),
            location: None,
        })?;

        if node.name != end_local_name {
            return Err(Error::MismatchedEndTag {
                expected: node.name.clone(),
                found: end_local_name,
                location: Some(node.name_source.clone()),
            });
        }

        let end_offset = self.reader.buffer_position() as usize;
        let source_info = self.make_source_info(node.start_offset, end_offset);
        Ok(node.finish(source_info))
    }

    fn handle_text(&mut self, e: &BytesText<'_>, event_start: usize) -> Result<()> {
        let text = e.unescape().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid text content: {}", err),
            position: Some(event_start as u64),
        })?;

        let whitespace_only = text.trim().is_empty();
        let end_offset = self.reader.buffer_position() as usize;
        let source_info = self.make_source_info(event_start, end_offset);

        match self.stack.last_mut() {
            Some(_) if whitespace_only && !self.options.keep_whitespace_text => {}
            Some(node) => node.children.push(XmlNode::Text {
                content: text.into_owned(),
                source_info,
            }),
            None if whitespace_only => {}
            None => {
                return Err(Error::InvalidStructure {
                    message: "Text content outside the root element".to_string(),
                    location: Some(source_info),
                });
            }
        }
        Ok(())
    }

    fn handle_cdata(&mut self, e: BytesCData<'_>, event_start: usize) -> Result<()> {
        let content = String::from_utf8_lossy(&e.into_inner()).into_owned();
        let end_offset = self.reader.buffer_position() as usize;
        let source_info = self.make_source_info(event_start, end_offset);

        match self.stack.last_mut() {
            Some(node) => {
                node.children.push(XmlNode::CData {
                    content,
                    source_info,
                });
                Ok(())
            }
            None => Err(Error::InvalidStructure {
                message: "CDATA section outside the root element".to_string(),
                location: Some(source_info),
            }),
        }
    }

    fn handle_comment(&mut self, e: BytesText<'_>, event_start: usize) {
        if !self.options.keep_comments {
            return;
        }

        let content = String::from_utf8_lossy(&e.into_inner()).into_owned();
        let end_offset = self.reader.buffer_position() as usize;
        let source_info = self.make_source_info(event_start, end_offset);

        // Comments around the root element are not kept
        if let Some(node) = self.stack.last_mut() {
            node.children.push(XmlNode::Comment {
                content,
                source_info,
            });
        }
    }

    /// Split a start tag's attributes into real attributes and namespace
    /// declarations.
    fn parse_attributes(
        &self,
        e: &BytesStart<'_>,
        tag_start: usize,
    ) -> Result<(Vec<XmlAttribute>, Vec<(String, String)>)> {
        let mut attributes = Vec::new();
        let mut namespaces = Vec::new();

        // The tag content starts after '<'
        let content_start = tag_start + 1;
        let tag_str = String::from_utf8_lossy(e.as_ref());

        // Where to resume searching for the next attribute in the tag content
        let mut cursor = e.name().as_ref().len();

        for attr_result in e.attributes() {
            let attr = attr_result?;

            let full_name = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr
                .unescape_value()
                .map_err(|err| Error::XmlSyntax {
                    message: format!("Invalid attribute value: {}", err),
                    position: Some(tag_start as u64),
                })?
                .into_owned();

            let spans = locate_attribute(&tag_str, cursor, &full_name);
            if let Some((_, (_, value_end))) = spans {
                cursor = value_end;
            }

            if full_name == "xmlns" {
                namespaces.push((String::new(), value));
                continue;
            }
            if let Some(declared) = full_name.strip_prefix("xmlns:") {
                namespaces.push((declared.to_string(), value));
                continue;
            }

            let (name_source, value_source) = match spans {
                Some(((name_start, name_end), (value_start, value_end))) => (
                    self.make_source_info(content_start + name_start, content_start + name_end),
                    self.make_source_info(content_start + value_start, content_start + value_end),
                ),
                None => {
                    let fallback = self.make_source_info(content_start, content_start + 1);
                    (fallback.clone(), fallback)
                }
            };

            let (name, prefix) = split_name(&full_name);
            attributes.push(XmlAttribute {
                name,
                name_source,
                prefix,
                value,
                value_source,
            });
        }

        Ok((attributes, namespaces))
    }

    /// Resolve a prefix (or the default namespace for `None`) against the
    /// element's own declarations, then its ancestors'.
    fn resolve_namespace(&self, prefix: Option<&str>, own: &[(String, String)]) -> Option<String> {
        let key = prefix.unwrap_or("");
        if key == "xml" {
            return Some(XML_NAMESPACE.to_string());
        }

        own.iter()
            .rev()
            .chain(
                self.stack
                    .iter()
                    .rev()
                    .flat_map(|node| node.namespaces.iter().rev()),
            )
            .find(|(declared, _)| declared == key)
            .and_then(|(_, uri)| (!uri.is_empty()).then(|| uri.clone()))
    }

    fn make_source_info(&self, start: usize, end: usize) -> SourceInfo {
        SourceInfo::from_offsets(self.file_id, start, end, &self.line_index)
    }
}

/// Split `prefix:local` into `(local, Some(prefix))`.
fn split_name(full_name: &str) -> (String, Option<String>) {
    match full_name.split_once(':') {
        Some((prefix, local)) => (local.to_string(), Some(prefix.to_string())),
        None => (full_name.to_string(), None),
    }
}

/// Find an attribute's name and quoted value inside raw tag content,
/// starting at byte `from`. Offsets are relative to the tag content.
fn locate_attribute(tag: &str, from: usize, key: &str) -> Option<((usize, usize), (usize, usize))> {
    let mut search = from;

    while let Some(rel) = tag.get(search..)?.find(key) {
        let name_start = search + rel;
        let name_end = name_start + key.len();
        search = name_end;

        if !tag[..name_start].ends_with(char::is_whitespace) {
            continue;
        }

        let Some(after_eq) = tag[name_end..].trim_start().strip_prefix('=') else {
            continue;
        };
        let value = after_eq.trim_start();
        let value_start = tag.len() - value.len();

        let quote = value.chars().next()?;
        if quote != '"' && quote != '\'' {
            return None;
        }
        let close = value[1..].find(quote)?;

        // Include quotes in the value span
        return Some(((name_start, name_end), (value_start, value_start + close + 2)));
    }

    None
}
