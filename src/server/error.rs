//! Error types for the HTTP server and handlers.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur while serving or handling a request.
///
/// Handlers return this type; the router and auth decorators propagate it
/// without inspecting it, and only the transport turns it into a 500.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The request head or its declared body exceeds the configured limit.
    #[error("Request exceeds the {0} byte limit")]
    PayloadTooLarge(usize),

    /// A handler failed to produce a response.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid server or auth configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
