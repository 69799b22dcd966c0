use bytes::Bytes;
use fast_ews_rs::ns;
use fast_ews_rs::xml::{ResponseDocument, XmlDocument, escape_xml};

#[test]
fn parse_resolves_names_independent_of_prefix_choice() {
    let xml = r#"
<a:Root xmlns:a="http://schemas.microsoft.com/exchange/services/2006/types">
  <b:Child xmlns:b="http://schemas.microsoft.com/exchange/services/2006/types">hello</b:Child>
</a:Root>
"#;

    let doc = XmlDocument::parse(xml.as_bytes()).expect("xml parsing succeeds");
    let root = doc.first_child(doc.root()).expect("top-level element");
    assert_eq!(doc.name(root), "Root");
    assert_eq!(doc.namespace(root), ns::TYPES);

    // Different prefix, same URI: lookup by resolved namespace still hits.
    let child = doc
        .find_element(doc.root(), "Child", ns::TYPES)
        .expect("child resolves into the types namespace");
    assert_eq!(doc.text(child), "hello");
}

#[test]
fn find_element_searches_subtrees_before_siblings() {
    let xml = r#"
<Root>
  <Wrapper><Target>deep</Target></Wrapper>
  <Target>shallow</Target>
</Root>
"#;

    let doc = XmlDocument::parse(xml.as_bytes()).expect("xml parsing succeeds");
    let found = doc
        .find_element(doc.root(), "Target", "")
        .expect("target exists");
    assert_eq!(doc.text(found), "deep");
}

#[test]
fn find_element_returns_nested_match_before_its_ancestor() {
    let xml = "<Root><Target><Target>inner</Target></Target></Root>";

    let doc = XmlDocument::parse(xml.as_bytes()).expect("xml parsing succeeds");
    let found = doc
        .find_element(doc.root(), "Target", "")
        .expect("target exists");
    assert_eq!(doc.text(found), "inner");
}

#[test]
fn find_element_misses_when_namespace_differs() {
    let xml = r#"<Root><Child xmlns="urn:other">x</Child></Root>"#;

    let doc = XmlDocument::parse(xml.as_bytes()).expect("xml parsing succeeds");
    assert!(doc.find_element(doc.root(), "Child", ns::TYPES).is_none());
    assert!(doc.find_element(doc.root(), "Child", "urn:other").is_some());
}

#[test]
fn attributes_drop_namespace_declarations_and_unescape_values() {
    let xml = r#"<Root xmlns:t="urn:x" Id="a&amp;b" ChangeKey="ck"/>"#;

    let doc = XmlDocument::parse(xml.as_bytes()).expect("xml parsing succeeds");
    let root = doc.first_child(doc.root()).expect("top-level element");
    assert_eq!(doc.attributes(root).len(), 2);
    assert_eq!(doc.attr(root, "Id"), Some("a&b"));
    assert_eq!(doc.attr(root, "ChangeKey"), Some("ck"));
    assert_eq!(doc.attr(root, "xmlns"), None);
}

#[test]
fn parse_rejects_unbalanced_document() {
    assert!(XmlDocument::parse(b"<a><b></a>").is_err());
    assert!(XmlDocument::parse(b"<a><b>").is_err());
}

#[test]
fn parse_rejects_element_free_input() {
    assert!(XmlDocument::parse(b"just text").is_err());
}

#[test]
fn serialization_is_minimal_and_prefixes_protocol_namespaces() {
    let xml = r#"<Task xmlns="http://schemas.microsoft.com/exchange/services/2006/types"><Subject>a &amp; b</Subject><Empty/></Task>"#;

    let doc = XmlDocument::parse(xml.as_bytes()).expect("xml parsing succeeds");
    let task = doc.first_child(doc.root()).expect("top-level element");
    assert_eq!(
        doc.to_xml(task),
        "<t:Task><t:Subject>a &amp; b</t:Subject><t:Empty/></t:Task>"
    );
}

#[test]
fn response_payload_is_parsed_exactly_once() {
    let response = ResponseDocument::new(200, Bytes::from_static(b"<Root><Child/></Root>"));

    let first = response.payload().expect("payload parses");
    let second = response.payload().expect("payload parses");
    assert!(std::ptr::eq(first, second));
}

#[test]
fn response_parse_failure_is_cached_too() {
    let response = ResponseDocument::new(500, Bytes::from_static(b"<broken>"));

    let first = response.payload().expect_err("broken body fails").to_string();
    let second = response.payload().expect_err("broken body fails").to_string();
    assert_eq!(first, second);
}

#[test]
#[should_panic(expected = "response body must not be empty")]
fn empty_response_body_is_rejected_outright() {
    let _ = ResponseDocument::new(200, Bytes::new());
}

#[test]
fn escape_xml_covers_all_markup_characters() {
    assert_eq!(
        escape_xml(r#"<a b="c">&'d'</a>"#),
        "&lt;a b=&quot;c&quot;&gt;&amp;&apos;d&apos;&lt;/a&gt;"
    );
    assert_eq!(escape_xml("plain"), "plain");
}
