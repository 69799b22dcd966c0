//! Typed domain objects built from/serialized to XML sub-trees.
//!
//! Every item owns exactly one [`ItemId`] (possibly invalid while the item
//! has not been created server-side) and exactly one [`XmlFragment`] holding
//! all other properties as elements in the types namespace. Nothing else has
//! mutable access to that fragment. Typed accessors are thin wrappers over
//! the fragment's `get_value`/`set_or_update`.

pub mod contact;
pub mod message;
pub mod task;

pub use contact::Contact;
pub use message::Message;
pub use task::Task;

use crate::common::error::Result;
use crate::ns;
use crate::soap::response_message::FromXmlElement;
use crate::xml::document::{NodeId, XmlDocument, escape_xml};
use crate::xml::fragment::XmlFragment;

/// Opaque versioned reference to a stored object on the server.
///
/// Valid iff the identifier string is non-empty; a default-constructed id is
/// always invalid. Comparison is exact and case-sensitive; identifiers are
/// never normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemId {
    id: String,
    change_key: String,
}

impl ItemId {
    pub fn new(id: impl Into<String>, change_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            change_key: change_key.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn change_key(&self) -> &str {
        &self.change_key
    }

    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
    }

    /// Wire form used inside request bodies.
    pub fn to_xml(&self) -> String {
        format!(
            r#"<t:ItemId Id="{}" ChangeKey="{}"/>"#,
            escape_xml(&self.id),
            escape_xml(&self.change_key)
        )
    }

    /// Read the id out of an item element (or out of an `ItemId` element
    /// directly). The protocol guarantees an id on every server-originated
    /// item, so a missing one is a contract violation.
    pub(crate) fn from_element(doc: &XmlDocument, element: NodeId) -> Self {
        let node = if doc.name(element) == "ItemId" && doc.namespace(element) == ns::TYPES {
            element
        } else {
            doc.find_element(element, "ItemId", ns::TYPES)
                .unwrap_or_else(|| panic!("{} element has no ItemId child", doc.name(element)))
        };
        Self::new(
            doc.attr(node, "Id").unwrap_or_default(),
            doc.attr(node, "ChangeKey").unwrap_or_default(),
        )
    }
}

impl FromXmlElement for ItemId {
    fn from_xml_element(doc: &XmlDocument, element: NodeId) -> Result<Self> {
        Ok(Self::from_element(doc, element))
    }
}

/// Reference to an attachment, anchored to the item it hangs off when the
/// server provided one. Valid under the same non-empty-identifier rule as
/// [`ItemId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentId {
    id: String,
    root_item_id: Option<ItemId>,
}

impl AttachmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            root_item_id: None,
        }
    }

    pub fn with_root_item(id: impl Into<String>, root_item_id: ItemId) -> Self {
        Self {
            id: id.into(),
            root_item_id: Some(root_item_id),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root_item_id(&self) -> Option<&ItemId> {
        self.root_item_id.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
    }
}

impl FromXmlElement for AttachmentId {
    fn from_xml_element(doc: &XmlDocument, element: NodeId) -> Result<Self> {
        let node = if doc.name(element) == "AttachmentId" && doc.namespace(element) == ns::TYPES {
            element
        } else {
            doc.find_element(element, "AttachmentId", ns::TYPES)
                .unwrap_or_else(|| {
                    panic!("{} element has no AttachmentId child", doc.name(element))
                })
        };
        let id = doc.attr(node, "Id").unwrap_or_default().to_string();
        let root_item_id = doc.attr(node, "RootItemId").map(|root| {
            ItemId::new(root, doc.attr(node, "RootItemChangeKey").unwrap_or_default())
        });
        Ok(Self {
            id,
            root_item_id,
        })
    }
}

/// Concrete item types: the element name they appear under, the attribute
/// fragments their Create/Delete wrappers need, and access to their two
/// owned parts.
pub trait Item: Sized {
    /// Local name of the item element in the types namespace.
    const ELEMENT_NAME: &'static str;
    /// Attributes appended to the `CreateItem` wrapper, leading space
    /// included.
    const CREATE_ATTRIBUTES: &'static str = "";
    /// Attributes appended to the `DeleteItem` wrapper, leading space
    /// included.
    const DELETE_ATTRIBUTES: &'static str = "";

    fn from_parts(item_id: ItemId, properties: XmlFragment) -> Self;
    fn item_id(&self) -> &ItemId;
    fn set_item_id(&mut self, item_id: ItemId);
    fn properties(&self) -> &XmlFragment;
    fn properties_mut(&mut self) -> &mut XmlFragment;

    /// Item body for a CreateItem request: the property fragment wrapped in
    /// this type's element tags.
    fn to_create_request_body(&self) -> String {
        format!(
            "<t:{el}>{props}</t:{el}>",
            el = Self::ELEMENT_NAME,
            props = self.properties().to_xml()
        )
    }
}

/// Generates an item type: the struct, its two-part ownership, the common
/// accessors shared by every item class, and its response-element factory.
macro_rules! ews_item {
    (
        $(#[$meta:meta])*
        $name:ident {
            element: $element:literal
            $(, create_attributes: $create:literal)?
            $(, delete_attributes: $delete:literal)?
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            item_id: $crate::items::ItemId,
            properties: $crate::xml::fragment::XmlFragment,
        }

        impl $name {
            /// A fresh, unbound item: empty property set, invalid id.
            pub fn new() -> Self {
                Self::default()
            }

            pub fn item_id(&self) -> &$crate::items::ItemId {
                &self.item_id
            }

            pub fn properties(&self) -> &$crate::xml::fragment::XmlFragment {
                &self.properties
            }

            pub fn properties_mut(&mut self) -> &mut $crate::xml::fragment::XmlFragment {
                &mut self.properties
            }

            pub fn get_item_class(&self) -> String {
                self.properties.get_value("ItemClass")
            }

            pub fn get_subject(&self) -> String {
                self.properties.get_value("Subject")
            }

            pub fn set_subject(&mut self, subject: &str) {
                self.properties.set_or_update("Subject", subject);
            }

            pub fn get_body(&self) -> String {
                self.properties.get_value("Body")
            }

            /// Sets a plain-text body. The `BodyType` attribute rides along
            /// on the same element.
            pub fn set_body(&mut self, text: &str) {
                self.properties.set_or_update("Body", text);
                if let Some(node) = self.properties.get_node("Body") {
                    self.properties.set_attribute(node, "BodyType", "Text");
                }
            }

            pub fn get_sensitivity(&self) -> String {
                self.properties.get_value("Sensitivity")
            }

            pub fn get_importance(&self) -> String {
                self.properties.get_value("Importance")
            }

            pub fn get_date_time_created(&self) -> String {
                self.properties.get_value("DateTimeCreated")
            }

            pub fn get_date_time_received(&self) -> String {
                self.properties.get_value("DateTimeReceived")
            }

            pub fn get_last_modified_time(&self) -> String {
                self.properties.get_value("LastModifiedTime")
            }

            pub fn get_culture(&self) -> String {
                self.properties.get_value("Culture")
            }

            pub fn has_attachments(&self) -> bool {
                self.properties.get_value("HasAttachments") == "true"
            }

            pub fn is_draft(&self) -> bool {
                self.properties.get_value("IsDraft") == "true"
            }

            pub fn is_reminder_enabled(&self) -> bool {
                self.properties.get_value("ReminderIsSet") == "true"
            }

            pub fn set_reminder_enabled(&mut self, enabled: bool) {
                self.properties
                    .set_or_update("ReminderIsSet", if enabled { "true" } else { "false" });
            }

            pub fn get_reminder_due_by(&self) -> String {
                self.properties.get_value("ReminderDueBy")
            }

            pub fn set_reminder_due_by(&mut self, date_time: &str) {
                self.properties.set_or_update("ReminderDueBy", date_time);
            }
        }

        impl $crate::items::Item for $name {
            const ELEMENT_NAME: &'static str = $element;
            $(const CREATE_ATTRIBUTES: &'static str = $create;)?
            $(const DELETE_ATTRIBUTES: &'static str = $delete;)?

            fn from_parts(
                item_id: $crate::items::ItemId,
                properties: $crate::xml::fragment::XmlFragment,
            ) -> Self {
                Self {
                    item_id,
                    properties,
                }
            }

            fn item_id(&self) -> &$crate::items::ItemId {
                &self.item_id
            }

            fn set_item_id(&mut self, item_id: $crate::items::ItemId) {
                self.item_id = item_id;
            }

            fn properties(&self) -> &$crate::xml::fragment::XmlFragment {
                &self.properties
            }

            fn properties_mut(&mut self) -> &mut $crate::xml::fragment::XmlFragment {
                &mut self.properties
            }
        }

        impl $crate::soap::response_message::FromXmlElement for $name {
            /// Build from a response element: read the nested item id, then
            /// detach the property sub-tree. After this returns the item is
            /// fully independent of the response buffer.
            fn from_xml_element(
                doc: &$crate::xml::document::XmlDocument,
                element: $crate::xml::document::NodeId,
            ) -> $crate::common::error::Result<Self> {
                let item_id = $crate::items::ItemId::from_element(doc, element);
                let properties =
                    $crate::xml::fragment::XmlFragment::from_children(doc, element)?;
                Ok(Self {
                    item_id,
                    properties,
                })
            }
        }
    };
}

pub(crate) use ews_item;
