//! Strict views onto document elements.
//!
//! A [`Node`] wraps one element of a parsed tree and remembers which child
//! names have been looked up through it. [`Node::done`] then fails if the
//! element has a child that was never looked up or ignored, so reading a
//! document field by field doubles as a check that nothing was missed.

use crate::convert::{attribute_bool, child_bool, parse_number};
use crate::error::{Error, Result};
use cxml_source_map::SourceInfo;
use cxml_tree::{XmlElement, XmlNode};
use std::cell::RefCell;
use std::str::FromStr;

/// Child names looked up through a view.
#[derive(Debug)]
enum Taken<'a> {
    Owned(RefCell<Vec<String>>),
    /// Owned by a [`crate::Document`] and shared by its root views.
    Shared(&'a RefCell<Vec<String>>),
}

impl Taken<'_> {
    fn cell(&self) -> &RefCell<Vec<String>> {
        match self {
            Taken::Owned(cell) => cell,
            Taken::Shared(cell) => cell,
        }
    }
}

/// A view onto one element of a parsed document.
///
/// Views borrow the tree; child lookups return new views with their own
/// bookkeeping.
///
/// ```rust
/// use cxml::Node;
///
/// let xml = cxml_tree::parse("<A><B>42</B><C>fred</C></A>").unwrap();
/// let a = Node::new(&xml.root);
///
/// assert_eq!(a.number_child::<i32>("B").unwrap(), 42);
/// assert!(a.done().is_err()); // <C> was never read
///
/// a.ignore_child("C");
/// assert!(a.done().is_ok());
/// ```
#[derive(Debug)]
pub struct Node<'a> {
    element: Option<&'a XmlElement>,
    taken: Taken<'a>,
}

impl Default for Node<'_> {
    /// A view with no element. Every operation that needs one fails.
    fn default() -> Self {
        Self {
            element: None,
            taken: Taken::Owned(RefCell::default()),
        }
    }
}

impl<'a> Node<'a> {
    pub fn new(element: &'a XmlElement) -> Self {
        Self {
            element: Some(element),
            taken: Taken::Owned(RefCell::default()),
        }
    }

    pub(crate) fn shared(element: Option<&'a XmlElement>, taken: &'a RefCell<Vec<String>>) -> Self {
        Self {
            element,
            taken: Taken::Shared(taken),
        }
    }

    /// The underlying element, if the view has one.
    pub fn element(&self) -> Option<&'a XmlElement> {
        self.element
    }

    pub fn source_info(&self) -> Option<&'a SourceInfo> {
        self.element.map(|element| &element.source_info)
    }

    /// Child names looked up so far, in lookup order.
    pub fn taken(&self) -> Vec<String> {
        self.taken.cell().borrow().clone()
    }

    fn position(&self) -> Result<&'a XmlElement> {
        self.element.ok_or(Error::NoPosition)
    }

    fn take(&self, name: &str) {
        self.taken.cell().borrow_mut().push(name.to_string());
    }

    /// The element's local name.
    pub fn name(&self) -> Result<&'a str> {
        Ok(self.position()?.name.as_str())
    }

    /// The element's direct text children, concatenated.
    ///
    /// CDATA sections and comments are not included. Reading content does
    /// not count as looking up any child.
    pub fn content(&self) -> Result<String> {
        Ok(self.position()?.text())
    }

    /// The namespace URI the element is in, or `""`.
    pub fn namespace_uri(&self) -> Result<&'a str> {
        Ok(self.position()?.namespace.as_deref().unwrap_or(""))
    }

    /// The element's namespace prefix, or `""`.
    pub fn namespace_prefix(&self) -> Result<&'a str> {
        Ok(self.position()?.prefix.as_deref().unwrap_or(""))
    }

    /// Direct child elements named `name`, in document order.
    ///
    /// `name` counts as looked up even when nothing matches.
    pub fn node_children(&self, name: &str) -> Result<Vec<Node<'a>>> {
        let element = self.position()?;
        self.take(name);
        Ok(named_children(element, name).map(Node::new).collect())
    }

    /// Every direct child element. Does not count as looking any of them up.
    pub fn all_node_children(&self) -> Result<Vec<Node<'a>>> {
        Ok(self
            .position()?
            .children
            .iter()
            .filter_map(XmlNode::as_element)
            .map(Node::new)
            .collect())
    }

    /// The only child named `name`, or `None`. Fails if there are several.
    fn unique_child(&self, name: &str) -> Result<Option<&'a XmlElement>> {
        let element = self.position()?;
        self.take(name);

        let mut matches = named_children(element, name);
        let first = matches.next();
        match matches.next() {
            Some(second) => Err(Error::DuplicateTag {
                parent: element.name.clone(),
                name: name.to_string(),
                location: second.source_info.clone(),
            }),
            None => Ok(first),
        }
    }

    fn required_child(&self, name: &str) -> Result<&'a XmlElement> {
        let element = self.position()?;
        self.unique_child(name)?.ok_or_else(|| Error::MissingTag {
            parent: element.name.clone(),
            name: name.to_string(),
            location: element.source_info.clone(),
        })
    }

    /// The single child named `name`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTag`] if there is none, [`Error::DuplicateTag`] if
    /// there is more than one.
    pub fn node_child(&self, name: &str) -> Result<Node<'a>> {
        self.required_child(name).map(Node::new)
    }

    /// The child named `name` if there is one.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateTag`] if there is more than one.
    pub fn optional_node_child(&self, name: &str) -> Result<Option<Node<'a>>> {
        Ok(self.unique_child(name)?.map(Node::new))
    }

    pub fn string_child(&self, name: &str) -> Result<String> {
        Ok(self.required_child(name)?.text())
    }

    pub fn optional_string_child(&self, name: &str) -> Result<Option<String>> {
        Ok(self.unique_child(name)?.map(XmlElement::text))
    }

    /// `true` if the child's content is `1`, `yes` or `True`. Any other
    /// content is `false`.
    pub fn bool_child(&self, name: &str) -> Result<bool> {
        Ok(child_bool(&self.string_child(name)?))
    }

    pub fn optional_bool_child(&self, name: &str) -> Result<Option<bool>> {
        Ok(self.optional_string_child(name)?.map(|text| child_bool(&text)))
    }

    /// The child's content as a number. See [`crate::parse_number`] for how
    /// text that is not a number is handled.
    pub fn number_child<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr + Default,
    {
        Ok(parse_number(&self.string_child(name)?))
    }

    pub fn optional_number_child<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr + Default,
    {
        Ok(self.optional_string_child(name)?.map(|text| parse_number(&text)))
    }

    /// Mark `name` as looked up without reading it.
    pub fn ignore_child(&self, name: &str) {
        self.take(name);
    }

    pub fn optional_string_attribute(&self, name: &str) -> Option<&'a str> {
        self.element?.get_attribute(name)
    }

    /// # Errors
    ///
    /// [`Error::MissingAttribute`] if the attribute is absent or the view has
    /// no element.
    pub fn string_attribute(&self, name: &str) -> Result<&'a str> {
        self.optional_string_attribute(name)
            .ok_or_else(|| Error::MissingAttribute {
                element: self.element.map(|element| element.name.clone()),
                name: name.to_string(),
                location: self.source_info().cloned(),
            })
    }

    /// `true` if the attribute is `1` or `yes`. Unlike [`Node::bool_child`],
    /// `True` is `false`.
    pub fn bool_attribute(&self, name: &str) -> Result<bool> {
        Ok(attribute_bool(self.string_attribute(name)?))
    }

    pub fn optional_bool_attribute(&self, name: &str) -> Option<bool> {
        self.optional_string_attribute(name).map(attribute_bool)
    }

    pub fn number_attribute<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr + Default,
    {
        Ok(parse_number(self.string_attribute(name)?))
    }

    pub fn optional_number_attribute<T>(&self, name: &str) -> Option<T>
    where
        T: FromStr + Default,
    {
        self.optional_string_attribute(name).map(parse_number)
    }

    /// Check that every child element has been looked up or ignored.
    ///
    /// Text, CDATA and comments are not checked, and neither are attributes.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedTag`] for the first child element whose name was
    /// never looked up.
    pub fn done(&self) -> Result<()> {
        let element = self.position()?;
        let taken = self.taken.cell().borrow();

        let unexpected = element
            .children
            .iter()
            .filter_map(XmlNode::as_element)
            .find(|child| !taken.contains(&child.name));

        match unexpected {
            Some(child) => Err(Error::UnexpectedTag {
                parent: element.name.clone(),
                name: child.name.clone(),
                location: child.source_info.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn named_children<'a>(element: &'a XmlElement, name: &str) -> impl Iterator<Item = &'a XmlElement> {
    element
        .children
        .iter()
        .filter_map(XmlNode::as_element)
        .filter(move |child| child.name == name)
}
