//! An ordered, rule-based HTTP request router.
//!
//! Requests are matched against a list of predicates in order and handed to
//! the first matching handler; a mandatory fallback answers everything else
//! with `404 Not Found`. Handlers can be wrapped in an [`AuthHandler`] that
//! authenticates the caller and checks one permission before delegating.
//!
//! # Features
//!
//! - Composable predicates: method, path pattern, `All`, `Any`, custom
//! - First-match-wins dispatch over an immutable routing table
//! - Authentication and authorization decorators with 401/403 short-circuits
//! - Routing tables for a Ruby gem repository
//! - A small tokio HTTP/1.1 transport
//!
//! # Examples
//!
//! ## Routing
//!
//! ```
//! use microroute_rs::{HttpResponse, Method, Predicate, Router, StatusCode, handler_fn};
//!
//! # fn main() -> Result<(), microroute_rs::RoutingError> {
//! let router = Router::builder()
//!     .route(
//!         Predicate::route(Method::GET, "/api/v1/gems/{gem}.json")?,
//!         handler_fn(|_req| async { Ok(HttpResponse::new(StatusCode::Ok).with_body_string("{}")) }),
//!     )
//!     .build();
//!
//! assert_eq!(router.entries().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Protecting a handler
//!
//! ```
//! use std::sync::Arc;
//! use microroute_rs::{
//!     Action, AuthHandler, BasicAuth, HttpResponse, Permission, StaticUsers, StatusCode,
//!     UserPermissions, handler_fn,
//! };
//!
//! let upload = handler_fn(|_req| async { Ok(HttpResponse::new(StatusCode::Created)) });
//! let protected = AuthHandler::new(
//!     upload,
//!     Arc::new(BasicAuth),
//!     Arc::new(StaticUsers::new().with_user("alice", "wonderland")),
//!     Permission::new(Arc::new(UserPermissions::new().grant("alice", [Action::Write])), Action::Write),
//! );
//! # let _ = protected;
//! ```

pub mod auth;
pub mod gem;
pub mod parser;
pub mod routing;
pub mod server;

#[cfg(test)]
mod test_support;

// Re-export commonly used items for convenience
pub use auth::{
    AcceptAll, Action, AuthHandler, AuthOutcome, AuthSettings, Authentication, BasicAuth, CredentialExtractor,
    Credentials, FreePermissions, Identity, Permission, Permissions, StaticUsers, UserPermissions,
};
pub use parser::{Error as ParserError, Headers, HttpRequest, HttpVersion, Method, parse_head, parse_request};
pub use routing::{Error as RoutingError, PathPattern, Predicate, Router, RoutingEntry};
pub use server::{
    BoxHandler, Error as ServerError, Handler, HandlerFuture, HttpResponse, HttpServer, ServerConfig,
    SimpleHandler, StatusCode, boxed, handler_fn,
};
