//! HTTP request model and parser.
//!
//! The transport turns raw bytes into an [`HttpRequest`] here before handing
//! it to the router.

mod request;
mod method;
mod version;
mod headers;
mod error;

pub use request::{HttpRequest, head_length, parse_head, parse_request};
pub use method::Method;
pub use version::HttpVersion;
pub use headers::Headers;
pub use error::Error;
