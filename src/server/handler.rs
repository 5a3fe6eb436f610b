//! The request handler capability.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::HttpRequest;
use crate::server::{Error, HttpResponse, StatusCode};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// Anything that turns one request into one response.
///
/// The returned future owns everything it needs, so a handler can be shared
/// behind an `Arc` and invoked from many connections at once.
pub trait Handler: Send + Sync {
    fn handle(&self, request: HttpRequest) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    fn handle(&self, request: HttpRequest) -> HandlerFuture {
        Box::pin(self(request))
    }
}

/// Shared handle to a handler, as stored in routing tables.
pub type BoxHandler = Arc<dyn Handler>;

/// Wrap a handler for storage in a routing table.
pub fn boxed(handler: impl Handler + 'static) -> BoxHandler {
    Arc::new(handler)
}

/// Turn an async function or closure into a routable handler.
pub fn handler_fn<F, Fut>(f: F) -> BoxHandler
where
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    Arc::new(f)
}

/// A handler that answers every request with the same response.
#[derive(Debug, Clone)]
pub struct SimpleHandler {
    response: HttpResponse,
}

impl SimpleHandler {
    pub fn new(response: HttpResponse) -> Self {
        Self { response }
    }

    /// `404 Not Found` with an empty body.
    pub fn not_found() -> Self {
        Self::new(HttpResponse::new(StatusCode::NotFound))
    }
}

impl Handler for SimpleHandler {
    fn handle(&self, _request: HttpRequest) -> HandlerFuture {
        let response = self.response.clone();
        Box::pin(async move { Ok(response) })
    }
}
