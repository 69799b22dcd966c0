//! Detached, independently owned XML sub-trees.
//!
//! A fragment is built by serializing a node (or a node's children) out of a
//! larger document and re-parsing the text with the parser pre-seeded so
//! that names left unbound by the detachment resolve into the EWS types
//! namespace. Once constructed it holds no references to the source
//! document: it can be walked, edited, and serialized on its own. Items use
//! fragments as their property storage.

use crate::common::error::Result;
use crate::ns;
use crate::xml::document::{NodeId, XmlDocument};

#[derive(Debug, Clone, Default)]
pub struct XmlFragment {
    doc: XmlDocument,
    /// True when the tree was re-parsed under a carrier element that exists
    /// only to make multi-rooted content parseable. The carrier never shows
    /// up in serialization or lookups.
    wrapped: bool,
}

impl XmlFragment {
    /// An empty fragment with no backing text. Used when an item is built
    /// from scratch by client code; insertions go directly under the root.
    pub fn new() -> Self {
        Self {
            doc: XmlDocument::empty(),
            wrapped: false,
        }
    }

    /// Detach `node` (with descendants) from `source`.
    ///
    /// The node is serialized to text and re-parsed under the types default
    /// namespace, so elements that relied on an ancestor namespace
    /// declaration still resolve correctly afterwards.
    pub fn from_node(source: &XmlDocument, node: NodeId) -> Result<Self> {
        Self::reparse(&source.to_xml(node))
    }

    /// Detach the children of `node`, dropping the enclosing element. This
    /// is how items store their properties: the `<Task>`/`<Contact>` wrapper
    /// stays out of the fragment so client-built and server-built items have
    /// the same shape.
    pub fn from_children(source: &XmlDocument, node: NodeId) -> Result<Self> {
        let inner = source.inner_xml(node);
        if inner.is_empty() {
            return Ok(Self::new());
        }
        Self::reparse(&inner)
    }

    fn reparse(text: &str) -> Result<Self> {
        // A serialized fragment may have several top-level elements, which a
        // bare parse would reject; parse under a carrier element instead.
        let carrier = format!("<fragment>{text}</fragment>");
        let doc = XmlDocument::parse_with_default(carrier.as_bytes(), ns::TYPES)?;
        Ok(Self { doc, wrapped: true })
    }

    pub fn document(&self) -> &XmlDocument {
        &self.doc
    }

    /// The element insertions and serialization operate on: the carrier when
    /// one exists, otherwise the synthetic document root.
    fn content_root(&self) -> NodeId {
        if self.wrapped {
            self.doc
                .first_child(self.doc.root())
                .unwrap_or_else(|| self.doc.root())
        } else {
            self.doc.root()
        }
    }

    /// First descendant element with the given local name in the types
    /// namespace. Absence is a normal condition (optional properties), never
    /// an error.
    pub fn get_node(&self, local_name: &str) -> Option<NodeId> {
        self.doc.find_element(self.doc.root(), local_name, ns::TYPES)
    }

    /// Text content of the named element, or the empty string when absent.
    ///
    /// An empty result is ambiguous between "absent" and "present but
    /// empty"; that ambiguity is part of the protocol client's observable
    /// behavior and is kept. Use [`get_node`](Self::get_node) to tell the
    /// two apart.
    pub fn get_value(&self, local_name: &str) -> String {
        match self.get_node(local_name) {
            Some(id) => self.doc.text(id).to_string(),
            None => String::new(),
        }
    }

    /// Replace-or-insert the named element's text value.
    ///
    /// If the element exists with the same text already, this is a no-op
    /// with zero structural mutation. If it exists with a different value it
    /// is rewritten in place, keeping its position in document order.
    /// Otherwise a new element in the types namespace is appended at the
    /// root. Afterwards exactly one element with that name holds the value.
    pub fn set_or_update(&mut self, local_name: &str, value: &str) {
        if let Some(id) = self.get_node(local_name) {
            if self.doc.text(id) == value {
                return;
            }
            self.doc.clear_children(id);
            self.doc.set_text(id, value);
            return;
        }
        let root = self.content_root();
        let id = self.doc.append_element(root, local_name, ns::TYPES);
        self.doc.set_text(id, value);
    }

    /// Append a new child element in the types namespace, under `parent` or
    /// at the root when `parent` is `None`. Returns the new node.
    pub fn append_element(&mut self, parent: Option<NodeId>, local_name: &str) -> NodeId {
        let parent = parent.unwrap_or_else(|| self.content_root());
        self.doc.append_element(parent, local_name, ns::TYPES)
    }

    pub fn set_text(&mut self, node: NodeId, value: &str) {
        self.doc.set_text(node, value);
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.doc.set_attribute(node, name, value);
    }

    /// Serialize to the minimal wire form expected by the server: no
    /// indentation, types-namespace elements prefixed `t:` to match the
    /// request envelope declarations.
    pub fn to_xml(&self) -> String {
        self.doc.inner_xml(self.content_root())
    }

    pub fn is_empty(&self) -> bool {
        self.doc.first_child(self.content_root()).is_none()
    }
}
