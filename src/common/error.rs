//! Error taxonomy surfaced to callers.
//!
//! Every recoverable condition is a variant here; callers branch on the
//! category and, for [`Error::Response`], on the decoded server code.
//! Violations of the protocol contract (a required element missing where the
//! server guarantees its presence, an empty response body) are panics, not
//! variants: they signal a library bug or a server behavior change and must
//! not be caught and continued.

use thiserror::Error;

use crate::codes::ResponseCode;

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Connection, DNS, or TLS failure reported by the transport. Never
    /// retried by the library.
    #[error("transport failure: {0}")]
    Transport(#[source] anyhow::Error),

    /// Any HTTP status other than 200 or 500.
    #[error("unexpected HTTP status {0}")]
    UnexpectedHttpStatus(u16),

    /// The whole request was rejected with a SOAP fault (HTTP 500) and the
    /// fault body carried a generic fault string, or nothing parseable.
    #[error("SOAP fault: {0}")]
    SoapFault(String),

    /// A SOAP fault carrying the request-schema violation triple.
    #[error("schema violation at line {line}, position {position}: {violation}")]
    SchemaViolation {
        line: u32,
        position: u32,
        violation: String,
    },

    /// The server delivered the response (HTTP 200) but reported an
    /// application-level error for the operation. This is the common failure
    /// path for business-rule violations.
    #[error("server reported {0}")]
    Response(ResponseCode),

    /// Malformed XML where well-formed XML was required. Wraps the parser's
    /// diagnostic text.
    #[error("XML parse error: {0}")]
    Parse(String),
}
