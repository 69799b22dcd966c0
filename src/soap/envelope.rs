//! Request envelope construction.
//!
//! The envelope shape is fixed by the server and byte-exact where the server
//! is strict: prefixes `soap`, `m`, and `t` are the ones every operation
//! body below is written against.

use crate::ns;

/// Schema version advertised in the optional `RequestServerVersion` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerVersion {
    Exchange2007,
    Exchange2007Sp1,
    Exchange2010,
    Exchange2010Sp1,
    Exchange2010Sp2,
    Exchange2013,
    Exchange2013Sp1,
}

impl ServerVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerVersion::Exchange2007 => "Exchange2007",
            ServerVersion::Exchange2007Sp1 => "Exchange2007_SP1",
            ServerVersion::Exchange2010 => "Exchange2010",
            ServerVersion::Exchange2010Sp1 => "Exchange2010_SP1",
            ServerVersion::Exchange2010Sp2 => "Exchange2010_SP2",
            ServerVersion::Exchange2013 => "Exchange2013",
            ServerVersion::Exchange2013Sp1 => "Exchange2013_SP1",
        }
    }
}

/// Wrap an operation body in the SOAP envelope.
pub fn build_envelope(body: &str, server_version: Option<ServerVersion>) -> String {
    let mut out = String::with_capacity(body.len() + 512);
    out.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    out.push_str(r#"<soap:Envelope xmlns:xsi=""#);
    out.push_str(ns::XSI);
    out.push_str(r#"" xmlns:xsd=""#);
    out.push_str(ns::XSD);
    out.push_str(r#"" xmlns:soap=""#);
    out.push_str(ns::SOAP);
    out.push_str(r#"" xmlns:m=""#);
    out.push_str(ns::MESSAGES);
    out.push_str(r#"" xmlns:t=""#);
    out.push_str(ns::TYPES);
    out.push_str(r#"">"#);
    if let Some(version) = server_version {
        out.push_str(r#"<soap:Header><t:RequestServerVersion Version=""#);
        out.push_str(version.as_str());
        out.push_str(r#""/></soap:Header>"#);
    }
    out.push_str("<soap:Body>");
    out.push_str(body);
    out.push_str("</soap:Body></soap:Envelope>");
    out
}
