//! Ordered, first-match-wins request dispatch.

use std::fmt;

use log::debug;

use crate::parser::HttpRequest;
use crate::routing::predicate::Predicate;
use crate::server::{BoxHandler, Handler, HandlerFuture, SimpleHandler, boxed};

/// One predicate paired with the handler it guards.
#[derive(Clone)]
pub struct RoutingEntry {
    pub predicate: Predicate,
    pub handler: BoxHandler,
}

impl RoutingEntry {
    pub fn new(predicate: Predicate, handler: BoxHandler) -> Self {
        Self { predicate, handler }
    }
}

impl fmt::Debug for RoutingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingEntry")
            .field("predicate", &self.predicate)
            .finish_non_exhaustive()
    }
}

/// An immutable routing table.
///
/// Entries are tried in the order they were added and the first one whose
/// predicate matches receives the request. Specificity plays no part, so
/// narrow and auth-protected routes must come before catch-alls. When no
/// entry matches the fallback handler answers, so every request reaches
/// exactly one handler.
#[derive(Clone)]
pub struct Router {
    entries: Vec<RoutingEntry>,
    fallback: BoxHandler,
}

impl Router {
    /// Create a router from entries and the fallback handler.
    pub fn new(entries: Vec<RoutingEntry>, fallback: BoxHandler) -> Self {
        Self { entries, fallback }
    }

    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    pub fn entries(&self) -> &[RoutingEntry] {
        &self.entries
    }

    /// Index of the entry that would receive `request`, or `None` for the fallback.
    pub fn select(&self, request: &HttpRequest) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.predicate.matches(request))
    }

    /// Route a request to exactly one handler and return its result unchanged.
    pub fn dispatch(&self, request: HttpRequest) -> HandlerFuture {
        match self.select(&request) {
            Some(index) => {
                let entry = &self.entries[index];
                debug!(
                    "{method} {path} matched route #{index} ({predicate})",
                    method = request.method,
                    path = request.path,
                    predicate = entry.predicate
                );
                entry.handler.handle(request)
            }
            None => {
                debug!(
                    "{method} {path} matched no route, using fallback",
                    method = request.method,
                    path = request.path
                );
                self.fallback.handle(request)
            }
        }
    }
}

impl Handler for Router {
    fn handle(&self, request: HttpRequest) -> HandlerFuture {
        self.dispatch(request)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Collects entries in order and freezes them into a [`Router`].
#[derive(Default)]
pub struct RouterBuilder {
    entries: Vec<RoutingEntry>,
    fallback: Option<BoxHandler>,
}

impl RouterBuilder {
    /// Append an entry. Later entries only see requests earlier ones rejected.
    pub fn route(mut self, predicate: Predicate, handler: BoxHandler) -> Self {
        self.entries.push(RoutingEntry::new(predicate, handler));
        self
    }

    /// Replace the default `404 Not Found` fallback.
    pub fn fallback(mut self, handler: BoxHandler) -> Self {
        self.fallback = Some(handler);
        self
    }

    pub fn build(self) -> Router {
        let fallback = self
            .fallback
            .unwrap_or_else(|| boxed(SimpleHandler::not_found()));
        Router::new(self.entries, fallback)
    }
}
