use fast_ews_rs::soap::{ServerVersion, build_envelope};

#[test]
fn envelope_declares_protocol_namespaces_and_wraps_body() {
    let envelope = build_envelope("<m:GetItem/>", None);

    assert!(envelope.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    assert!(envelope.contains(r#"xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/""#));
    assert!(
        envelope
            .contains(r#"xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages""#)
    );
    assert!(
        envelope.contains(r#"xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types""#)
    );
    assert!(envelope.contains("<soap:Body><m:GetItem/></soap:Body>"));
    assert!(envelope.ends_with("</soap:Envelope>"));
    assert!(!envelope.contains("soap:Header"));
}

#[test]
fn envelope_advertises_requested_server_version() {
    let envelope = build_envelope("<m:GetItem/>", Some(ServerVersion::Exchange2013Sp1));

    assert!(envelope.contains(
        r#"<soap:Header><t:RequestServerVersion Version="Exchange2013_SP1"/></soap:Header>"#
    ));
}

#[test]
fn server_version_strings_match_the_schema_names() {
    assert_eq!(ServerVersion::Exchange2007.as_str(), "Exchange2007");
    assert_eq!(ServerVersion::Exchange2007Sp1.as_str(), "Exchange2007_SP1");
    assert_eq!(ServerVersion::Exchange2010Sp2.as_str(), "Exchange2010_SP2");
    assert_eq!(ServerVersion::Exchange2013Sp1.as_str(), "Exchange2013_SP1");
}
