//! Error types for request parsing.

use thiserror::Error;

/// Errors that can occur while turning raw bytes into an [`HttpRequest`](crate::parser::HttpRequest).
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP method in the request is not supported.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The request target is not an origin-form path.
    #[error("Invalid HTTP path")]
    InvalidPath,

    /// The request line does not have exactly three parts.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The HTTP version in the request is not supported.
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// A required header is missing from the request.
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// A header line has no colon or an empty name.
    #[error("Invalid header format")]
    InvalidHeaderFormat,

    #[error("Empty request")]
    EmptyRequest,

    /// The connection ended before the declared `Content-Length` arrived.
    #[error("Incomplete body: expected {expected} bytes, received {received}")]
    IncompleteBody { expected: usize, received: usize },

    /// Error parsing a JSON body.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
