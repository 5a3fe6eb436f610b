//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;
use serde::de::DeserializeOwned;

use crate::parser::error::Error;
use crate::parser::headers::Headers;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// Represents an HTTP request.
///
/// A request is built once by the transport and then moved into the router,
/// which hands it on to exactly one handler.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target, including any query string
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers
    pub headers: Headers,
    /// The request body
    pub body: Vec<u8>,
    /// Query parameters parsed from the path
    pub query_params: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method
    /// * `path` - The request target, query string included
    /// * `version` - The HTTP version
    /// * `headers` - The HTTP headers
    ///
    /// # Returns
    ///
    /// A new HTTP request with an empty body
    pub fn new(method: Method, path: impl Into<String>, version: HttpVersion, headers: Headers) -> Self {
        let path = path.into();
        let query_params: HashMap<String, String> = path
            .split_once('?')
            .map(|(_, query)| query
                .split('&')
                .filter(|s| !s.is_empty())
                .map(|pair| match pair.split_once('=') {
                    Some((k, v)) => (k.to_string(), v.to_string()),
                    None => (pair.to_string(), String::new()),
                })
                .collect())
            .unwrap_or_default();

        Self {
            method,
            path,
            version,
            headers,
            body: Vec::new(),
            query_params,
        }
    }

    /// Create a new HTTP request with a body.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method
    /// * `path` - The request target, query string included
    /// * `version` - The HTTP version
    /// * `headers` - The HTTP headers
    /// * `body` - The request body
    ///
    /// # Returns
    ///
    /// A new HTTP request with the specified body
    pub fn with_body(method: Method, path: impl Into<String>, version: HttpVersion, headers: Headers, body: Vec<u8>) -> Self {
        let mut request = Self::new(method, path, version, headers);
        request.body = body;
        request
    }

    /// The path component of the request target, without the query string.
    pub fn path_only(&self) -> &str {
        match self.path.split_once('?') {
            Some((path, _)) => path,
            None => &self.path,
        }
    }

    /// Get the first value of a header, compared case-insensitively.
    ///
    /// # Arguments
    ///
    /// * `name` - The header name
    ///
    /// # Returns
    ///
    /// The first value of the header, if present
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    /// Parse the request body as JSON.
    ///
    /// # Returns
    ///
    /// The parsed JSON value, or an error if the body is not valid JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }

        let json = serde_json::from_slice(&self.body)?;
        Ok(json)
    }

    /// Check if the request has a JSON body.
    pub fn is_json(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }

    /// Get a query parameter value.
    ///
    /// # Arguments
    ///
    /// * `name` - The query parameter name
    ///
    /// # Returns
    ///
    /// The query parameter value, if present
    pub fn get_query_param(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }

    /// Check if a query parameter exists.
    pub fn has_query_param(&self, name: &str) -> bool {
        self.query_params.contains_key(name)
    }

    /// The declared body length, if the request carries a valid `Content-Length`.
    pub fn content_length(&self) -> Option<usize> {
        self.get_header("Content-Length")
            .and_then(|value| value.trim().parse().ok())
    }
}

/// Find the end of the request head (the index just past the blank line).
pub fn head_length(input: &[u8]) -> Option<usize> {
    input
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
        .or_else(|| {
            input
                .windows(2)
                .position(|window| window == b"\n\n")
                .map(|pos| pos + 2)
        })
}

/// Parse the request line and headers, ignoring anything after the head.
///
/// The transport uses this to learn the declared `Content-Length` before the
/// body has arrived.
///
/// # Arguments
///
/// * `input` - A byte slice starting with the request head
///
/// # Returns
///
/// A request with an empty body, or an error if the head is invalid
pub fn parse_head(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let head = match head_length(input) {
        Some(end) => &input[..end],
        None => input,
    };

    let head_str = std::str::from_utf8(head)
        .map_err(|_| Error::MalformedRequestLine("Invalid UTF-8".to_string()))?;

    let mut lines = head_str.lines();

    let request_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(Error::EmptyRequest),
    };

    // Split the request line into method, path, and version
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let method = Method::from_str(parts[0])?;

    let path = parts[1].to_string();
    if !path.starts_with('/') && path != "*" {
        return Err(Error::InvalidPath);
    }

    let version = HttpVersion::from_str(parts[2])?;

    let mut headers = Headers::new();
    for line in lines {
        // Empty line indicates the end of headers
        if line.is_empty() {
            break;
        }

        let (name, value) = line.split_once(':').ok_or(Error::InvalidHeaderFormat)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidHeaderFormat);
        }
        headers.append(name, value.trim());
    }

    if version == HttpVersion::Http11 && !headers.contains("Host") {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    Ok(HttpRequest::new(method, path, version, headers))
}

/// Parse an HTTP request from a byte slice.
///
/// Everything after the blank line that ends the head is taken as the body,
/// truncated to `Content-Length` when that header is present. A body shorter
/// than its declared length is rejected.
///
/// # Arguments
///
/// * `input` - A byte slice containing the HTTP request to parse
///
/// # Returns
///
/// The parsed HTTP request, or an error if the request is invalid
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    let mut request = parse_head(input)?;

    let body = match head_length(input) {
        Some(end) => &input[end..],
        None => &[][..],
    };

    let body_len = match request.content_length() {
        Some(expected) if expected > body.len() => {
            return Err(Error::IncompleteBody { expected, received: body.len() });
        }
        Some(expected) => expected,
        None => body.len(),
    };
    request.body = body[..body_len].to_vec();

    Ok(request)
}
