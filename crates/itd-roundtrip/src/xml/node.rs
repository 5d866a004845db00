//! Element tree used for round-tripping

use crate::hash::ContentHash;
use indexmap::IndexMap;

/// Attribute holding an element's generation hash
pub const Z_ATTRIBUTE: &str = "z";
/// `z` value that pins an element to the user
pub const USER_MANAGED: &str = "user-managed";
/// `z` value for a generated element whose hash is filled in on merge
pub const UNHASHED: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    Comment(String),
}

impl XmlNode {
    #[inline]
    #[must_use]
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// How the merge treats an existing element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// No `z`: its own attributes belong to the user, its children are merged
    Container,
    /// `z="user-managed"`
    UserManaged,
    /// `z` matches the recomputed hash, or is `?`
    Generated,
    /// `z` no longer matches; someone edited it after generation
    HandEdited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub(crate) name: String,
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) children: Vec<XmlNode>,
}

impl XmlElement {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Stamp `z` with the current hash
    #[must_use]
    pub fn with_unique_key(mut self) -> Self {
        self.set_unique_key();
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    #[inline]
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Replaces an existing value in place, appends otherwise
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    #[inline]
    #[must_use]
    pub fn z(&self) -> Option<&str> {
        self.attribute(Z_ATTRIBUTE)
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn push_node(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Child elements, skipping text and comments
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    /// Concatenated direct text children
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                XmlNode::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace all direct text with `text`, placed before any child element
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.retain(|c| !matches!(c, XmlNode::Text(_)));
        let text = text.into();
        if !text.is_empty() {
            self.children.insert(0, XmlNode::Text(text));
        }
    }

    /// Hash of the name, the non-`z` attributes in order and the trimmed
    /// direct text, in short hex form
    #[must_use]
    pub fn unique_key(&self) -> String {
        let text = self.text();
        let attributes = self
            .attributes
            .iter()
            .filter(|(k, _)| k.as_str() != Z_ATTRIBUTE)
            .flat_map(|(k, v)| [k.as_str(), v.as_str()]);
        let parts = std::iter::once(self.name.as_str())
            .chain(attributes)
            .chain(std::iter::once(text.trim()));
        ContentHash::compute_parts(parts).short()
    }

    pub fn set_unique_key(&mut self) {
        let key = self.unique_key();
        self.set_attribute(Z_ATTRIBUTE, key);
    }

    /// Replace every `z="?"` in this subtree with the element's hash
    pub fn stamp_unhashed(&mut self) {
        for child in self.elements_mut() {
            child.stamp_unhashed();
        }
        if self.z() == Some(UNHASHED) {
            self.set_unique_key();
        }
    }

    #[must_use]
    pub fn state(&self) -> NodeState {
        match self.z() {
            None => NodeState::Container,
            Some(USER_MANAGED) => NodeState::UserManaged,
            Some(UNHASHED) => NodeState::Generated,
            Some(z) if z == self.unique_key() => NodeState::Generated,
            Some(_) => NodeState::HandEdited,
        }
    }

    /// Attributes other than `z`, in order
    #[must_use]
    pub fn plain_attributes(&self) -> Vec<(&str, &str)> {
        self.attributes
            .iter()
            .filter(|(k, _)| k.as_str() != Z_ATTRIBUTE)
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Drop whitespace-only text nodes in this subtree
    pub fn remove_text_nodes(&mut self) {
        self.children
            .retain(|c| !matches!(c, XmlNode::Text(t) if t.trim().is_empty()));
        for child in self.elements_mut() {
            child.remove_text_nodes();
        }
    }

    /// Depth-first search for an element with the given `id`
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<&XmlElement> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.elements().find_map(|el| el.element_by_id(id))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut XmlElement> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.elements_mut().find_map(|el| el.element_by_id_mut(id))
    }
}

/// A root element plus whether an XML declaration precedes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub(crate) declaration: bool,
    pub(crate) root: XmlElement,
}

impl XmlDocument {
    #[must_use]
    pub fn new(root: XmlElement) -> Self {
        Self {
            declaration: true,
            root,
        }
    }

    #[must_use]
    pub fn without_declaration(mut self) -> Self {
        self.declaration = false;
        self
    }

    #[inline]
    #[must_use]
    pub fn has_declaration(&self) -> bool {
        self.declaration
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    pub fn remove_text_nodes(&mut self) {
        self.root.remove_text_nodes();
    }

    pub fn stamp_unhashed(&mut self) {
        self.root.stamp_unhashed();
    }
}
