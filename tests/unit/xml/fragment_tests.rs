use fast_ews_rs::ns;
use fast_ews_rs::xml::{XmlDocument, XmlFragment};

fn task_document() -> XmlDocument {
    let xml = r#"
<Envelope xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
  <t:Task>
    <t:Subject>Write poem</t:Subject>
    <t:DueDate>2015-01-19T10:00:00Z</t:DueDate>
    <t:StatusDescription></t:StatusDescription>
  </t:Task>
</Envelope>
"#;
    XmlDocument::parse(xml.as_bytes()).expect("xml parsing succeeds")
}

#[test]
fn detached_children_outlive_the_source_document() {
    let fragment = {
        let doc = task_document();
        let task = doc
            .find_element(doc.root(), "Task", ns::TYPES)
            .expect("task present");
        XmlFragment::from_children(&doc, task).expect("detach succeeds")
    };

    // Source document is gone; the fragment still answers.
    assert_eq!(fragment.get_value("Subject"), "Write poem");
    assert_eq!(fragment.get_value("DueDate"), "2015-01-19T10:00:00Z");
}

#[test]
fn from_children_drops_the_item_wrapper() {
    let doc = task_document();
    let task = doc
        .find_element(doc.root(), "Task", ns::TYPES)
        .expect("task present");
    let fragment = XmlFragment::from_children(&doc, task).expect("detach succeeds");

    assert!(fragment.get_node("Task").is_none());
    assert!(fragment.to_xml().starts_with("<t:Subject>"));
}

#[test]
fn from_node_keeps_the_detached_element() {
    let doc = task_document();
    let task = doc
        .find_element(doc.root(), "Task", ns::TYPES)
        .expect("task present");
    let fragment = XmlFragment::from_node(&doc, task).expect("detach succeeds");

    assert!(fragment.get_node("Task").is_some());
    assert!(fragment.to_xml().starts_with("<t:Task>"));
}

#[test]
fn absent_and_empty_values_both_read_as_empty_string() {
    let doc = task_document();
    let task = doc
        .find_element(doc.root(), "Task", ns::TYPES)
        .expect("task present");
    let fragment = XmlFragment::from_children(&doc, task).expect("detach succeeds");

    // Present but empty.
    assert_eq!(fragment.get_value("StatusDescription"), "");
    assert!(fragment.get_node("StatusDescription").is_some());
    // Absent entirely.
    assert_eq!(fragment.get_value("Owner"), "");
    assert!(fragment.get_node("Owner").is_none());
}

#[test]
fn set_or_update_inserts_updates_in_place_and_converges() {
    let mut fragment = XmlFragment::new();

    fragment.set_or_update("Subject", "A");
    fragment.set_or_update("StartDate", "2026-01-01T00:00:00Z");
    assert_eq!(
        fragment.to_xml(),
        "<t:Subject>A</t:Subject><t:StartDate>2026-01-01T00:00:00Z</t:StartDate>"
    );

    // Update rewrites in place: document order is preserved.
    fragment.set_or_update("Subject", "B");
    let after_update = fragment.to_xml();
    assert_eq!(
        after_update,
        "<t:Subject>B</t:Subject><t:StartDate>2026-01-01T00:00:00Z</t:StartDate>"
    );

    // Same value again: serialization is byte-identical.
    fragment.set_or_update("Subject", "B");
    assert_eq!(fragment.to_xml(), after_update);
}

#[test]
fn empty_fragment_serializes_to_nothing() {
    let fragment = XmlFragment::new();
    assert!(fragment.is_empty());
    assert_eq!(fragment.to_xml(), "");
}

#[test]
fn cloned_fragments_are_independent() {
    let mut original = XmlFragment::new();
    original.set_or_update("Subject", "shared");

    let mut copy = original.clone();
    copy.set_or_update("Subject", "changed");

    assert_eq!(original.get_value("Subject"), "shared");
    assert_eq!(copy.get_value("Subject"), "changed");
}

#[test]
fn values_are_escaped_on_serialization() {
    let mut fragment = XmlFragment::new();
    fragment.set_or_update("Subject", "Tom & Jerry <3");
    assert_eq!(
        fragment.to_xml(),
        "<t:Subject>Tom &amp; Jerry &lt;3</t:Subject>"
    );
}
