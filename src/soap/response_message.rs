//! Parsing of `…ResponseMessage` elements.
//!
//! Every operation response carries one or more message elements of the
//! shape `envelope → body → <Op>ResponseMessage → (ResponseCode?, Items?)`.
//! The functions here extract the class/code pair and the typed payload
//! items. Missing elements the protocol guarantees (a `ResponseCode` on a
//! non-success message, `Items` on an item-bearing success) are panics: they
//! mean the server changed its contract or this library has a bug, and
//! neither must be silently swallowed.

use crate::codes::ResponseCode;
use crate::common::error::{Error, Result};
use crate::ns;
use crate::soap::response::{SoapResponse, fault_error};
use crate::xml::document::{NodeId, XmlDocument};

/// Outcome class of one response message. Warning is not success: it still
/// carries a decodable response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    Warning,
    Error,
}

impl ResponseClass {
    fn from_attr(value: &str) -> Self {
        match value {
            "Error" => ResponseClass::Error,
            "Warning" => ResponseClass::Warning,
            _ => ResponseClass::Success,
        }
    }
}

/// Types constructible from one response item element. This is the single
/// seam where the parsed-response world and the owned item-model world meet:
/// after `from_xml_element` returns, the value is fully independent of the
/// response buffer.
pub trait FromXmlElement: Sized {
    fn from_xml_element(doc: &XmlDocument, element: NodeId) -> Result<Self>;
}

/// Aggregate result of one response message.
#[derive(Debug)]
pub struct ResponseMessage<T> {
    pub class: ResponseClass,
    pub code: ResponseCode,
    pub items: Vec<T>,
}

impl<T> ResponseMessage<T> {
    /// Map any non-success message onto the domain error, carrying the
    /// decoded code. A Warning means the operation may have been applied
    /// only partially; callers must see it, not a plain success.
    pub fn into_result(self) -> Result<Self> {
        if self.class != ResponseClass::Success {
            return Err(Error::Response(self.code));
        }
        Ok(self)
    }
}

/// Read the required `ResponseClass` attribute and, for non-success
/// messages, decode the required `ResponseCode` child. Success always maps
/// to the canonical no-error code without looking further.
pub fn response_class_and_code(
    doc: &XmlDocument,
    message: NodeId,
) -> (ResponseClass, ResponseCode) {
    let class_attr = doc
        .attr(message, "ResponseClass")
        .unwrap_or_else(|| panic!("{} has no ResponseClass attribute", doc.name(message)));
    let class = ResponseClass::from_attr(class_attr);
    if class == ResponseClass::Success {
        return (class, ResponseCode::NoError);
    }

    let code_node = doc
        .find_element(message, "ResponseCode", ns::MESSAGES)
        .unwrap_or_else(|| {
            panic!(
                "non-success {} has no ResponseCode child",
                doc.name(message)
            )
        });
    let code_text = doc.text(code_node);
    let code = ResponseCode::parse(code_text)
        .unwrap_or_else(|| panic!("server sent unknown response code {code_text:?}"));
    (class, code)
}

/// Visit each immediate child element of the message's required `Items`
/// child, in document order. Zero children is legitimate (nothing matched);
/// a missing `Items` element is not.
pub fn for_each_item<F>(doc: &XmlDocument, message: NodeId, mut visit: F) -> Result<()>
where
    F: FnMut(NodeId) -> Result<()>,
{
    let items = doc
        .find_element(message, "Items", ns::MESSAGES)
        .unwrap_or_else(|| panic!("{} has no Items child", doc.name(message)));
    for &child in doc.children(items) {
        visit(child)?;
    }
    Ok(())
}

fn locate_message(response: &SoapResponse, wrapper: &str) -> Result<(NodeId, ResponseClass, ResponseCode)> {
    if response.is_soap_fault() {
        return Err(fault_error(response));
    }
    if !response.is_success() {
        return Err(Error::UnexpectedHttpStatus(response.status_code()));
    }
    let doc = response.payload()?;
    let message = doc
        .find_element(doc.root(), wrapper, ns::MESSAGES)
        .unwrap_or_else(|| panic!("response payload has no {wrapper} element"));
    let (class, code) = response_class_and_code(doc, message);
    Ok((message, class, code))
}

/// Parse an item-bearing response: locate the wrapper element anywhere in
/// the payload, extract class/code, and build one `T` per `Items` child.
/// Error-class messages skip item extraction (their `Items` may be absent).
pub fn parse_response_message<T: FromXmlElement>(
    response: &SoapResponse,
    wrapper: &str,
) -> Result<ResponseMessage<T>> {
    let (message, class, code) = locate_message(response, wrapper)?;
    let mut items = Vec::new();
    if class != ResponseClass::Error {
        let doc = response.payload()?;
        for_each_item(doc, message, |child| {
            items.push(T::from_xml_element(doc, child)?);
            Ok(())
        })?;
    }
    Ok(ResponseMessage { class, code, items })
}

/// Parse a response message that carries no `Items` (e.g. DeleteItem).
pub fn parse_response_class_and_code(
    response: &SoapResponse,
    wrapper: &str,
) -> Result<(ResponseClass, ResponseCode)> {
    let (_, class, code) = locate_message(response, wrapper)?;
    Ok((class, code))
}
