use fast_ews_rs::soap::FromXmlElement;
use fast_ews_rs::xml::XmlDocument;
use fast_ews_rs::{AttachmentId, ItemId};

#[test]
fn default_id_is_invalid() {
    let id = ItemId::default();
    assert!(!id.is_valid());
    assert_eq!(id.id(), "");
    assert_eq!(id.change_key(), "");
}

#[test]
fn non_empty_identifier_is_valid_even_without_change_key() {
    assert!(ItemId::new("abcde", "").is_valid());
    assert!(!ItemId::new("", "edcba").is_valid());
}

#[test]
fn comparison_is_exact_and_case_sensitive() {
    let id = ItemId::new("AbCdE", "edcba");
    assert_eq!(id, ItemId::new("AbCdE", "edcba"));
    assert_ne!(id, ItemId::new("abcde", "edcba"));
    assert_ne!(id, ItemId::new("AbCdE", "EDCBA"));
}

#[test]
fn attachment_id_reads_its_root_item_anchor() {
    let xml = r#"<t:AttachmentId
        xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"
        Id="att-1" RootItemId="abcde" RootItemChangeKey="edcba"/>"#;
    let doc = XmlDocument::parse(xml.as_bytes()).expect("xml parsing succeeds");
    let node = doc.first_child(doc.root()).expect("top-level element");

    let attachment = AttachmentId::from_xml_element(&doc, node).expect("id parses");
    assert!(attachment.is_valid());
    assert_eq!(attachment.id(), "att-1");
    assert_eq!(
        attachment.root_item_id(),
        Some(&ItemId::new("abcde", "edcba"))
    );

    assert!(!AttachmentId::default().is_valid());
    assert!(AttachmentId::new("att-2").root_item_id().is_none());
}

#[test]
fn wire_form_escapes_attribute_values() {
    let id = ItemId::new("a\"b", "c&d");
    assert_eq!(
        id.to_xml(),
        r#"<t:ItemId Id="a&quot;b" ChangeKey="c&amp;d"/>"#
    );
}
