//! Documents: a parsed tree plus root-name validation.

use crate::error::{Error, Result};
use crate::node::Node;
use cxml_source_map::{FileId, SourceContext};
use cxml_tree::{ParseOptions, XmlDocument};
use std::cell::RefCell;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// An XML document read once from a file, a string or a reader.
///
/// After a successful read the document behaves like a [`Node`] on its root
/// element. Lookups made through the document itself and through
/// [`Document::root`] share one record of taken child names.
///
/// ```rust
/// use cxml::Document;
///
/// let mut doc = Document::with_root_name("A");
/// doc.read_string("<A><B>42</B><E>yes</E></A>").unwrap();
///
/// assert_eq!(doc.string_child("B").unwrap(), "42");
/// assert!(doc.bool_child("E").unwrap());
/// doc.done().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct Document {
    /// Root name the document must have. `None` accepts any root.
    expected_root_name: Option<String>,

    options: ParseOptions,

    /// Every source handed to a `read_*` call, for rendering diagnostics.
    source_context: SourceContext,

    tree: Option<XmlDocument>,

    taken: RefCell<Vec<String>>,
}

impl Document {
    /// A document that accepts any root element.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document whose root element must be named `root_name`.
    pub fn with_root_name(root_name: impl Into<String>) -> Self {
        Self {
            expected_root_name: Some(root_name.into()),
            ..Self::default()
        }
    }

    /// Read the file at `path`, which must have a `root_name` root.
    pub fn open(root_name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let mut document = Self::with_root_name(root_name);
        document.read_file(path)?;
        Ok(document)
    }

    /// Use `options` for the next read.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse the file at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::SourceNotFound`] if nothing exists at `path`, [`Error::Read`]
    /// if it cannot be read, and otherwise as [`Document::read_string`].
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.check_unbound()?;

        if !path.exists() {
            return Err(Error::SourceNotFound {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(path = %path.display(), "Reading XML file");
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.bind(path.display().to_string(), content)
    }

    /// Parse `text`.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if the text is not well formed,
    /// [`Error::UnrecognisedRoot`] if the root element has the wrong name and
    /// [`Error::AlreadyParsed`] if the document has already been read.
    pub fn read_string(&mut self, text: &str) -> Result<()> {
        self.check_unbound()?;
        tracing::debug!(bytes = text.len(), "Reading XML string");
        self.bind("<string>".to_string(), text.to_string())
    }

    /// Parse everything `reader` yields.
    pub fn read_reader(&mut self, mut reader: impl Read) -> Result<()> {
        self.check_unbound()?;

        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|source| Error::Read {
                path: "<stream>".into(),
                source,
            })?;

        tracing::debug!(bytes = content.len(), "Reading XML stream");
        self.bind("<stream>".to_string(), content)
    }

    fn check_unbound(&self) -> Result<()> {
        match self.tree {
            Some(_) => Err(Error::AlreadyParsed),
            None => Ok(()),
        }
    }

    /// Parse `content`, check its root and keep the tree.
    ///
    /// The source is registered even when parsing fails so that the error
    /// can be rendered against it.
    fn bind(&mut self, path: String, content: String) -> Result<()> {
        // Ids are handed out in registration order
        let file_id = FileId(self.source_context.file_count());
        let parsed = cxml_tree::parse_with(&content, file_id, &self.options);
        self.source_context.add_file(path, content);
        let tree = parsed?;

        let found = &tree.root.name;
        match &self.expected_root_name {
            Some(expected) if expected != found => {
                tracing::debug!(%expected, %found, "Unrecognised root element");
                return Err(Error::UnrecognisedRoot {
                    expected: expected.clone(),
                    found: found.clone(),
                    location: tree.root.name_source.clone(),
                });
            }
            Some(_) => tracing::debug!(root = %found, "Root element validated"),
            None => tracing::debug!(root = %found, "Adopting root element name"),
        }

        // Names taken before the read refer to no tree
        self.taken.borrow_mut().clear();
        self.tree = Some(tree);
        Ok(())
    }

    pub fn is_parsed(&self) -> bool {
        self.tree.is_some()
    }

    /// The root element's name once read, otherwise the expected name.
    pub fn root_name(&self) -> Option<&str> {
        match &self.tree {
            Some(tree) => Some(tree.root.name.as_str()),
            None => self.expected_root_name.as_deref(),
        }
    }

    pub fn tree(&self) -> Option<&XmlDocument> {
        self.tree.as_ref()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source_context
    }

    /// A view of the root element. Before a successful read the view has no
    /// element and fails with [`Error::NoPosition`], except for the attribute
    /// accessors (see [`Document::string_attribute`]).
    pub fn root(&self) -> Node<'_> {
        Node::shared(self.tree.as_ref().map(|tree| &tree.root), &self.taken)
    }

    /// Render `error` as text, with a snippet of the source it points into.
    ///
    /// ```rust
    /// use cxml::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.read_string("<A><B/></A>").unwrap();
    ///
    /// let err = doc.done().unwrap_err();
    /// let text = doc.render_error(&err);
    /// assert!(text.contains("[CX-2-8] Unexpected XML Tag"));
    /// ```
    pub fn render_error(&self, error: &Error) -> String {
        error.to_diagnostic().to_text(Some(&self.source_context))
    }

    /// See [`Node::name`].
    pub fn name(&self) -> Result<&str> {
        self.root().name()
    }

    pub fn content(&self) -> Result<String> {
        self.root().content()
    }

    pub fn namespace_uri(&self) -> Result<&str> {
        self.root().namespace_uri()
    }

    pub fn namespace_prefix(&self) -> Result<&str> {
        self.root().namespace_prefix()
    }

    /// See [`Node::node_children`].
    pub fn node_children(&self, name: &str) -> Result<Vec<Node<'_>>> {
        self.root().node_children(name)
    }

    pub fn all_node_children(&self) -> Result<Vec<Node<'_>>> {
        self.root().all_node_children()
    }

    /// See [`Node::node_child`].
    pub fn node_child(&self, name: &str) -> Result<Node<'_>> {
        self.root().node_child(name)
    }

    pub fn optional_node_child(&self, name: &str) -> Result<Option<Node<'_>>> {
        self.root().optional_node_child(name)
    }

    pub fn string_child(&self, name: &str) -> Result<String> {
        self.root().string_child(name)
    }

    pub fn optional_string_child(&self, name: &str) -> Result<Option<String>> {
        self.root().optional_string_child(name)
    }

    pub fn bool_child(&self, name: &str) -> Result<bool> {
        self.root().bool_child(name)
    }

    pub fn optional_bool_child(&self, name: &str) -> Result<Option<bool>> {
        self.root().optional_bool_child(name)
    }

    pub fn number_child<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr + Default,
    {
        self.root().number_child(name)
    }

    pub fn optional_number_child<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr + Default,
    {
        self.root().optional_number_child(name)
    }

    pub fn ignore_child(&self, name: &str) {
        self.root().ignore_child(name);
    }

    /// See [`Node::string_attribute`].
    ///
    /// Before a successful read there is no element to carry attributes, so
    /// this fails with [`Error::MissingAttribute`] rather than
    /// [`Error::NoPosition`], and the `optional_*_attribute` accessors
    /// return `None`.
    pub fn string_attribute(&self, name: &str) -> Result<&str> {
        self.root().string_attribute(name)
    }

    pub fn optional_string_attribute(&self, name: &str) -> Option<&str> {
        self.root().optional_string_attribute(name)
    }

    pub fn bool_attribute(&self, name: &str) -> Result<bool> {
        self.root().bool_attribute(name)
    }

    pub fn optional_bool_attribute(&self, name: &str) -> Option<bool> {
        self.root().optional_bool_attribute(name)
    }

    pub fn number_attribute<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr + Default,
    {
        self.root().number_attribute(name)
    }

    pub fn optional_number_attribute<T>(&self, name: &str) -> Option<T>
    where
        T: FromStr + Default,
    {
        self.root().optional_number_attribute(name)
    }

    /// See [`Node::done`].
    pub fn done(&self) -> Result<()> {
        self.root().done()
    }
}
