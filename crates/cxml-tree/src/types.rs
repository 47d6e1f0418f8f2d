//! Core types for source-tracked XML trees.

use cxml_source_map::SourceInfo;

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// The document's top element.
    pub root: XmlElement,

    /// Source location of the entire document.
    pub source_info: SourceInfo,
}

/// The kind of a child node, fixed when the tree is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Element,
    Text,
    CData,
    Comment,
}

/// A child of an element, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),

    /// Character data, with entity and character references resolved.
    Text {
        content: String,
        source_info: SourceInfo,
    },

    /// The raw content of a `<![CDATA[...]]>` section.
    CData {
        content: String,
        source_info: SourceInfo,
    },

    /// The body of a `<!-- ... -->` comment.
    Comment {
        content: String,
        source_info: SourceInfo,
    },
}

/// An XML element with source location tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// The local name of the element (without namespace prefix).
    pub name: String,

    /// Source location of the element name.
    pub name_source: SourceInfo,

    /// Namespace prefix, if any (e.g., "dcp" in `<dcp:Reel>`).
    pub prefix: Option<String>,

    /// Namespace URI the element's prefix (or the default namespace) is bound to.
    pub namespace: Option<String>,

    /// Attributes of this element. Namespace declarations are not included.
    pub attributes: Vec<XmlAttribute>,

    /// Child nodes in document order.
    pub children: Vec<XmlNode>,

    /// Source location of the entire element, start tag to end tag.
    pub source_info: SourceInfo,
}

/// An XML attribute with source location tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    /// The local name of the attribute (without namespace prefix).
    pub name: String,

    pub name_source: SourceInfo,

    pub prefix: Option<String>,

    /// The attribute value (after unescaping XML entities).
    pub value: String,

    /// Source location of the attribute value, quotes included.
    pub value_source: SourceInfo,
}

impl XmlDocument {
    pub fn new(root: XmlElement, source_info: SourceInfo) -> Self {
        Self { root, source_info }
    }
}

impl XmlNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            XmlNode::Element(_) => NodeKind::Element,
            XmlNode::Text { .. } => NodeKind::Text,
            XmlNode::CData { .. } => NodeKind::CData,
            XmlNode::Comment { .. } => NodeKind::Comment,
        }
    }

    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn source_info(&self) -> &SourceInfo {
        match self {
            XmlNode::Element(e) => &e.source_info,
            XmlNode::Text { source_info, .. }
            | XmlNode::CData { source_info, .. }
            | XmlNode::Comment { source_info, .. } => source_info,
        }
    }
}

impl XmlElement {
    /// Create a new element without children.
    pub fn new(
        name: String,
        name_source: SourceInfo,
        prefix: Option<String>,
        attributes: Vec<XmlAttribute>,
        source_info: SourceInfo,
    ) -> Self {
        Self {
            name,
            name_source,
            prefix,
            namespace: None,
            attributes,
            children: Vec::new(),
            source_info,
        }
    }

    /// The name as written, `prefix:name` or `name`.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    /// Get an attribute value by name.
    ///
    /// `name` is matched as written: `id` finds only an unprefixed `id`,
    /// `p:id` only the `id` attribute with prefix `p`.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.get_attribute_full(name).map(|a| a.value.as_str())
    }

    /// Get an attribute by name, returning the full attribute with source info.
    pub fn get_attribute_full(&self, name: &str) -> Option<&XmlAttribute> {
        self.attributes.iter().find(|a| a.has_name(name))
    }

    /// Child elements with the given name, in document order.
    pub fn get_children(&self, name: &str) -> Vec<&XmlElement> {
        self.children
            .iter()
            .filter_map(XmlNode::as_element)
            .filter(|e| e.name == name)
            .collect()
    }

    /// All child elements, ignoring text, CDATA and comments.
    pub fn all_children(&self) -> Vec<&XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element).collect()
    }

    /// Concatenated text of the direct text children.
    ///
    /// CDATA sections and comments do not contribute.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_elements(&self) -> bool {
        self.children
            .iter()
            .any(|c| c.kind() == NodeKind::Element)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl XmlAttribute {
    /// Whether the attribute is written as `name` (`local` or `prefix:local`).
    pub fn has_name(&self, name: &str) -> bool {
        match (name.split_once(':'), &self.prefix) {
            (Some((prefix, local)), Some(own)) => prefix == own && local == self.name,
            (None, None) => name == self.name,
            _ => false,
        }
    }

    pub fn new(
        name: String,
        name_source: SourceInfo,
        prefix: Option<String>,
        value: String,
        value_source: SourceInfo,
    ) -> Self {
        Self {
            name,
            name_source,
            prefix,
            value,
            value_source,
        }
    }
}
