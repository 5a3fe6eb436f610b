//! HTTP server implementation for microroute-rs.
//!
//! This module holds the response model, the handler capability every route
//! target implements, and the tokio transport that feeds requests to a
//! [`Router`](crate::routing::Router).

mod response;
mod config;
mod error;
mod handler;
mod http_server;
mod tests;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use handler::{BoxHandler, Handler, HandlerFuture, SimpleHandler, boxed, handler_fn};
pub use http_server::HttpServer;
