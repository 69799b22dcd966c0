//! HTTP response wrapper and SOAP fault extraction.

use bytes::Bytes;

use crate::common::error::{Error, Result};
use crate::ns;
use crate::xml::document::{ResponseDocument, XmlDocument};

/// One HTTP response from the server, classified by status and parsed on
/// demand.
///
/// Status 200 carries a normal operation response whose per-operation
/// outcome lives *inside* the body (response class and code); status 500
/// means the entire request was rejected before any operation ran.
#[derive(Debug)]
pub struct SoapResponse {
    doc: ResponseDocument,
}

impl SoapResponse {
    /// Panics if `body` is empty; the server never sends an empty body for
    /// either status, so an empty one is a contract violation.
    pub fn new(status_code: u16, body: Bytes) -> Self {
        Self {
            doc: ResponseDocument::new(status_code, body),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.doc.status_code()
    }

    pub fn is_success(&self) -> bool {
        self.doc.status_code() == 200
    }

    /// True when the whole request was rejected (e.g. malformed request
    /// XML) rather than reported as a per-operation error inside a 200 body.
    pub fn is_soap_fault(&self) -> bool {
        self.doc.status_code() == 500
    }

    /// Lazily parsed payload; cached after the first call.
    pub fn payload(&self) -> Result<&XmlDocument> {
        self.doc.payload()
    }
}

/// Extract the most specific error a 500 fault body supports.
///
/// Preference order: the schema-violation triple carried in `MessageXml`
/// (only when line and position are numeric), then the generic
/// `faultstring`, then an unknown-reason fault when the body itself is
/// unusable. This never fails; an unparseable fault is still a fault.
pub(crate) fn fault_error(response: &SoapResponse) -> Error {
    let Ok(doc) = response.payload() else {
        return Error::SoapFault("unknown reason".to_string());
    };
    let root = doc.root();

    let line = doc.find_element(root, "LineNumber", ns::TYPES);
    let position = doc.find_element(root, "LinePosition", ns::TYPES);
    let violation = doc.find_element(root, "Violation", ns::TYPES);
    if let (Some(line), Some(position), Some(violation)) = (line, position, violation)
        && let (Ok(line), Ok(position)) = (doc.text(line).parse(), doc.text(position).parse())
    {
        return Error::SchemaViolation {
            line,
            position,
            violation: doc.text(violation).to_string(),
        };
    }

    // faultstring is unqualified in SOAP 1.1 fault bodies.
    if let Some(fault) = doc.find_element(root, "faultstring", "") {
        return Error::SoapFault(doc.text(fault).to_string());
    }

    Error::SoapFault("unknown reason".to_string())
}
