//! Shared helpers for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::parser::{Headers, HttpRequest, HttpVersion, Method};
use crate::server::{BoxHandler, Error, HttpResponse, StatusCode, handler_fn};

pub fn request(method: Method, path: &str) -> HttpRequest {
    let headers: Headers = [("Host", "localhost")].into_iter().collect();
    HttpRequest::new(method, path, HttpVersion::Http11, headers)
}

pub fn request_with_header(method: Method, path: &str, name: &str, value: &str) -> HttpRequest {
    let mut req = request(method, path);
    req.headers.append(name, value);
    req
}

/// A handler that counts its invocations and answers with a fixed status and body.
#[derive(Clone)]
pub struct Counting {
    calls: Arc<AtomicUsize>,
    handler: BoxHandler,
}

impl Counting {
    pub fn new(status: StatusCode, body: &'static str) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handler = handler_fn(move |_req| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok(HttpResponse::new(status).with_body_string(body)) }
        });
        Self { calls, handler }
    }

    /// A handler that counts its invocations and always fails.
    pub fn failing(message: &'static str) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handler = handler_fn(move |_req| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Err(Error::InternalError(message.to_string())) }
        });
        Self { calls, handler }
    }

    pub fn handler(&self) -> BoxHandler {
        self.handler.clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
