//! Namespace-resolved XML document model.
//!
//! Responses are parsed once into an arena of element records addressed by
//! [`NodeId`]; every string is owned by the arena, so a document moves as one
//! unit and nodes can never outlive their backing storage. Namespace
//! resolution happens at parse time: nodes carry their resolved namespace
//! URI, and lookups never depend on the prefixes the producer happened to
//! choose.

use std::sync::OnceLock;

use bytes::Bytes;
use quick_xml::NsReader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::common::error::{Error, Result};
use crate::ns;

/// Index of an element inside an [`XmlDocument`] arena.
///
/// Ids are only meaningful together with the document that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

/// A resolved attribute. Namespace declarations are consumed during parsing
/// and never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
struct ElementData {
    /// Resolved local name; empty for the synthetic document root.
    name: String,
    /// Resolved namespace URI; empty when the element is in no namespace.
    namespace: String,
    attributes: Vec<Attribute>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// Parsed XML tree. Node 0 is a synthetic root whose children are the
/// document's top-level elements.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    nodes: Vec<ElementData>,
}

impl Default for XmlDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl XmlDocument {
    /// An empty document: just the synthetic root.
    pub fn empty() -> Self {
        Self {
            nodes: vec![ElementData::default()],
        }
    }

    /// Parse a well-formed XML buffer. Elements without a namespace
    /// declaration in scope resolve to the empty namespace.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::parse_inner(bytes, "").map_err(Error::Parse)
    }

    /// Parse with a pre-seeded default namespace: names that would otherwise
    /// be unbound (no declaration in scope, or a prefix whose declaration was
    /// lost when a sub-tree was serialized without its ancestors) resolve
    /// into `default_ns` instead.
    pub fn parse_with_default(bytes: &[u8], default_ns: &str) -> Result<Self> {
        Self::parse_inner(bytes, default_ns).map_err(Error::Parse)
    }

    pub(crate) fn parse_inner(
        bytes: &[u8],
        default_ns: &str,
    ) -> std::result::Result<Self, String> {
        let mut reader = NsReader::from_reader(bytes);
        reader.config_mut().trim_text(false);

        let mut doc = Self::empty();
        let mut stack: Vec<NodeId> = vec![NodeId(0)];
        let mut buf = Vec::with_capacity(4 * 1024);

        loop {
            match reader.read_resolved_event_into(&mut buf) {
                Ok((resolved, Event::Start(e))) => {
                    let id = doc.push_element(*stack.last().unwrap(), &resolved, &e, default_ns)?;
                    stack.push(id);
                }
                Ok((resolved, Event::Empty(e))) => {
                    doc.push_element(*stack.last().unwrap(), &resolved, &e, default_ns)?;
                }
                Ok((_, Event::End(_))) => {
                    if stack.len() <= 1 {
                        return Err("unexpected closing tag".to_string());
                    }
                    stack.pop();
                }
                Ok((_, Event::Text(e))) => {
                    let text = decode_text(e.as_ref())?;
                    doc.append_text(*stack.last().unwrap(), &text);
                }
                Ok((_, Event::CData(e))) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    doc.append_text(*stack.last().unwrap(), &text);
                }
                Ok((_, Event::Eof)) => break,
                Ok(_) => {}
                Err(e) => return Err(e.to_string()),
            }
            buf.clear();
        }

        if stack.len() > 1 {
            return Err("unexpected end of document".to_string());
        }
        if doc.nodes.len() == 1 {
            return Err("document contains no elements".to_string());
        }
        Ok(doc)
    }

    fn push_element(
        &mut self,
        parent: NodeId,
        resolved: &ResolveResult<'_>,
        event: &BytesStart<'_>,
        default_ns: &str,
    ) -> std::result::Result<NodeId, String> {
        let name = String::from_utf8_lossy(event.local_name().as_ref()).into_owned();
        let namespace = match resolved {
            ResolveResult::Bound(uri) => String::from_utf8_lossy(uri.0).into_owned(),
            ResolveResult::Unbound | ResolveResult::Unknown(_) => default_ns.to_string(),
        };

        let mut attributes = Vec::new();
        for attr in event.attributes().with_checks(false) {
            let attr = attr.map_err(|e| format!("invalid attribute: {e}"))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let value = attr
                .unescape_value()
                .map_err(|e| format!("invalid attribute value: {e}"))?
                .into_owned();
            attributes.push(Attribute {
                name: String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned(),
                value,
            });
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(ElementData {
            name,
            namespace,
            attributes,
            text: String::new(),
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn append_text(&mut self, id: NodeId, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.nodes[id.0].text.push_str(trimmed);
    }

    /// The synthetic document root. Its first child is the top-level element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.first().copied()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn namespace(&self, id: NodeId) -> &str {
        &self.nodes[id.0].namespace
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        &self.nodes[id.0].attributes
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0]
            .attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Depth-first search over all descendants of `scope` for the first
    /// element whose resolved local name and namespace URI both match
    /// byte-for-byte. Each child's subtree is searched before the child
    /// itself is tested. `scope` itself is never a candidate.
    ///
    /// Matching by resolved URI keeps the search independent of whatever
    /// prefixes the producer declared.
    pub fn find_element(&self, scope: NodeId, local_name: &str, namespace: &str) -> Option<NodeId> {
        for &child in &self.nodes[scope.0].children {
            if let Some(found) = self.find_element(child, local_name, namespace) {
                return Some(found);
            }
            let data = &self.nodes[child.0];
            if data.name == local_name && data.namespace == namespace {
                return Some(child);
            }
        }
        None
    }

    pub(crate) fn append_element(&mut self, parent: NodeId, name: &str, namespace: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ElementData {
            name: name.to_string(),
            namespace: namespace.to_string(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn set_text(&mut self, id: NodeId, value: &str) {
        self.nodes[id.0].text.clear();
        self.nodes[id.0].text.push_str(value);
    }

    pub(crate) fn clear_children(&mut self, id: NodeId) {
        // Orphaned records stay in the arena; they are unreachable and die
        // with the document.
        self.nodes[id.0].children.clear();
    }

    pub(crate) fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let attrs = &mut self.nodes[id.0].attributes;
        if let Some(existing) = attrs.iter_mut().find(|a| a.name == name) {
            existing.value = value.to_string();
            return;
        }
        attrs.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Serialize one element (with descendants) to the minimal wire form.
    /// No indentation, no XML declaration.
    pub fn to_xml(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize the children of `id`, concatenated in document order.
    pub fn inner_xml(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in &self.nodes[id.0].children {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let data = &self.nodes[id.0];
        let tag = match prefix_for(&data.namespace) {
            Some(prefix) => format!("{prefix}:{}", data.name),
            None => data.name.clone(),
        };
        out.push('<');
        out.push_str(&tag);
        for attr in &data.attributes {
            out.push(' ');
            out.push_str(&attr.name);
            out.push_str("=\"");
            out.push_str(&escape_xml(&attr.value));
            out.push('"');
        }
        if data.text.is_empty() && data.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        out.push_str(&escape_xml(&data.text));
        for &child in &data.children {
            self.write_node(child, out);
        }
        out.push_str("</");
        out.push_str(&tag);
        out.push('>');
    }
}

/// Prefixes the server-facing serialization uses for the protocol
/// namespaces. These match the declarations on the request envelope.
fn prefix_for(namespace: &str) -> Option<&'static str> {
    match namespace {
        ns::TYPES => Some("t"),
        ns::MESSAGES => Some("m"),
        ns::SOAP => Some("soap"),
        _ => None,
    }
}

pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn decode_text(raw: &[u8]) -> std::result::Result<String, String> {
    match std::str::from_utf8(raw) {
        Ok(s) => Ok(unescape(s)
            .map_err(|err| format!("XML decode error: {err}"))?
            .into_owned()),
        Err(_) => Ok(String::from_utf8_lossy(raw).into_owned()),
    }
}

/// An HTTP response body bound to its parse result.
///
/// The raw bytes and the tree live and move together; parsing happens at
/// most once, on first access, and the outcome (tree or failure) is cached.
/// First access from two threads is serialized by the cell, but the intended
/// discipline is single ownership: one response, one owner, parsed once.
#[derive(Debug)]
pub struct ResponseDocument {
    status_code: u16,
    raw: Bytes,
    parsed: OnceLock<std::result::Result<XmlDocument, String>>,
}

impl ResponseDocument {
    /// Panics if `raw` is empty: the protocol never produces an empty body,
    /// so receiving one is a contract violation, not a recoverable state.
    pub fn new(status_code: u16, raw: Bytes) -> Self {
        assert!(
            !raw.is_empty(),
            "response body must not be empty (protocol contract)"
        );
        Self {
            status_code,
            raw,
            parsed: OnceLock::new(),
        }
    }

    /// HTTP status associated with the bytes; set at construction,
    /// independent of parsing.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// The parsed tree. The first call parses; later calls return the same
    /// tree (or the same wrapped parse failure) without re-parsing.
    pub fn payload(&self) -> Result<&XmlDocument> {
        match self
            .parsed
            .get_or_init(|| XmlDocument::parse_inner(&self.raw, ""))
        {
            Ok(doc) => Ok(doc),
            Err(msg) => Err(Error::Parse(msg.clone())),
        }
    }
}
