//! Namespace URIs used by the EWS wire protocol.

/// SOAP 1.1 envelope namespace.
pub const SOAP: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// EWS messages namespace (operation wrappers, `ResponseCode`, `Items`).
pub const MESSAGES: &str = "http://schemas.microsoft.com/exchange/services/2006/messages";

/// EWS types namespace (items, item ids, property elements).
pub const TYPES: &str = "http://schemas.microsoft.com/exchange/services/2006/types";

/// XML Schema instance namespace, declared on every request envelope.
pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XML Schema namespace, declared on every request envelope.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema";
