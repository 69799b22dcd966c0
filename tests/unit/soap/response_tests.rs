use bytes::Bytes;
use fast_ews_rs::soap::{ResponseClass, SoapResponse, parse_response_message};
use fast_ews_rs::{Error, ItemId, ResponseCode};

const CREATE_OK: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <m:CreateItemResponse
        xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages"
        xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
      <m:ResponseMessages>
        <m:CreateItemResponseMessage ResponseClass="Success">
          <m:ResponseCode>NoError</m:ResponseCode>
          <m:Items>
            <t:Task>
              <t:ItemId Id="abcde" ChangeKey="edcba"/>
            </t:Task>
          </m:Items>
        </m:CreateItemResponseMessage>
      </m:ResponseMessages>
    </m:CreateItemResponse>
  </s:Body>
</s:Envelope>"#;

const GET_NOT_FOUND: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <m:GetItemResponse
        xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages">
      <m:ResponseMessages>
        <m:GetItemResponseMessage ResponseClass="Error">
          <m:MessageText>The specified object was not found in the store.</m:MessageText>
          <m:ResponseCode>ErrorItemNotFound</m:ResponseCode>
        </m:GetItemResponseMessage>
      </m:ResponseMessages>
    </m:GetItemResponse>
  </s:Body>
</s:Envelope>"#;

const GET_WARNING: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <m:GetItemResponse
        xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages"
        xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
      <m:ResponseMessages>
        <m:GetItemResponseMessage ResponseClass="Warning">
          <m:ResponseCode>ErrorBatchProcessingStopped</m:ResponseCode>
          <m:Items>
            <t:Task>
              <t:ItemId Id="abcde" ChangeKey="edcba"/>
            </t:Task>
          </m:Items>
        </m:GetItemResponseMessage>
      </m:ResponseMessages>
    </m:GetItemResponse>
  </s:Body>
</s:Envelope>"#;

const SCHEMA_FAULT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <s:Fault>
      <faultcode>a:ErrorSchemaValidation</faultcode>
      <faultstring>The request failed schema validation.</faultstring>
      <detail>
        <t:MessageXml xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
          <t:LineNumber>12</t:LineNumber>
          <t:LinePosition>7</t:LinePosition>
          <t:Violation>bad element</t:Violation>
        </t:MessageXml>
      </detail>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;

const GARBLED_SCHEMA_FAULT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <s:Fault>
      <faultcode>a:ErrorSchemaValidation</faultcode>
      <faultstring>The request failed schema validation.</faultstring>
      <detail>
        <t:MessageXml xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
          <t:LineNumber>twelve</t:LineNumber>
          <t:LinePosition>7</t:LinePosition>
          <t:Violation>bad element</t:Violation>
        </t:MessageXml>
      </detail>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;

const PLAIN_FAULT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <s:Fault>
      <faultcode>s:Server</faultcode>
      <faultstring>Something broke.</faultstring>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;

fn response(status: u16, body: &str) -> SoapResponse {
    SoapResponse::new(status, Bytes::copy_from_slice(body.as_bytes()))
}

#[test]
fn success_message_yields_no_error_and_its_items() {
    let response = response(200, CREATE_OK);
    let message = parse_response_message::<ItemId>(&response, "CreateItemResponseMessage")
        .expect("message parses");

    assert_eq!(message.class, ResponseClass::Success);
    assert_eq!(message.code, ResponseCode::NoError);
    assert_eq!(message.items, vec![ItemId::new("abcde", "edcba")]);
}

#[test]
fn error_message_becomes_a_typed_response_error() {
    let response = response(200, GET_NOT_FOUND);
    let message = parse_response_message::<ItemId>(&response, "GetItemResponseMessage")
        .expect("message parses");

    assert_eq!(message.class, ResponseClass::Error);
    assert_eq!(message.code, ResponseCode::ErrorItemNotFound);
    assert!(message.items.is_empty());

    let err = message.into_result().expect_err("error class maps to Err");
    assert!(matches!(
        err,
        Error::Response(ResponseCode::ErrorItemNotFound)
    ));
}

#[test]
fn warning_message_is_not_success() {
    let response = response(200, GET_WARNING);
    let message = parse_response_message::<ItemId>(&response, "GetItemResponseMessage")
        .expect("message parses");

    // Warnings still carry their items and their decoded code.
    assert_eq!(message.class, ResponseClass::Warning);
    assert_eq!(message.code, ResponseCode::ErrorBatchProcessingStopped);
    assert_eq!(message.items.len(), 1);

    let err = message.into_result().expect_err("warning maps to Err");
    assert!(matches!(
        err,
        Error::Response(ResponseCode::ErrorBatchProcessingStopped)
    ));
}

#[test]
fn schema_fault_carries_line_position_and_violation() {
    let response = response(500, SCHEMA_FAULT);
    let err = parse_response_message::<ItemId>(&response, "CreateItemResponseMessage")
        .expect_err("fault maps to Err");

    match err {
        Error::SchemaViolation {
            line,
            position,
            violation,
        } => {
            assert_eq!(line, 12);
            assert_eq!(position, 7);
            assert_eq!(violation, "bad element");
        }
        other => panic!("expected schema violation, got {other:?}"),
    }
}

#[test]
fn non_numeric_fault_location_falls_back_to_faultstring() {
    let response = response(500, GARBLED_SCHEMA_FAULT);
    let err = parse_response_message::<ItemId>(&response, "CreateItemResponseMessage")
        .expect_err("fault maps to Err");

    // A garbled triple must not show up as a violation at line 0.
    match err {
        Error::SoapFault(reason) => {
            assert_eq!(reason, "The request failed schema validation.");
        }
        other => panic!("expected soap fault, got {other:?}"),
    }
}

#[test]
fn fault_without_detail_falls_back_to_faultstring() {
    let response = response(500, PLAIN_FAULT);
    let err = parse_response_message::<ItemId>(&response, "CreateItemResponseMessage")
        .expect_err("fault maps to Err");

    match err {
        Error::SoapFault(reason) => assert_eq!(reason, "Something broke."),
        other => panic!("expected soap fault, got {other:?}"),
    }
}

#[test]
fn statuses_other_than_ok_and_fault_are_rejected() {
    let response = response(404, "<html>not here</html>");
    let err = parse_response_message::<ItemId>(&response, "GetItemResponseMessage")
        .expect_err("unexpected status maps to Err");
    assert!(matches!(err, Error::UnexpectedHttpStatus(404)));
}

#[test]
#[should_panic(expected = "response payload has no")]
fn missing_response_message_element_is_a_contract_violation() {
    let response = response(200, "<Envelope><Body/></Envelope>");
    let _ = parse_response_message::<ItemId>(&response, "GetItemResponseMessage");
}

#[test]
fn response_codes_round_trip_their_schema_strings() {
    assert_eq!(ResponseCode::NoError.as_str(), "NoError");
    assert_eq!(
        ResponseCode::parse("ErrorItemNotFound"),
        Some(ResponseCode::ErrorItemNotFound)
    );
    assert_eq!(
        ResponseCode::parse("ErrorStaleObject"),
        Some(ResponseCode::ErrorStaleObject)
    );
    assert_eq!(ResponseCode::parse("ErrorMadeUpCode"), None);
    assert_eq!(ResponseCode::ErrorAccessDenied.to_string(), "ErrorAccessDenied");
}
