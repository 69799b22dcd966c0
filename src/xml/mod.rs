pub mod document;
pub mod fragment;

pub use document::{Attribute, NodeId, ResponseDocument, XmlDocument, escape_xml};
pub use fragment::XmlFragment;
