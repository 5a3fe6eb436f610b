//! Rule-based request routing.
//!
//! # Data Flow
//! ```text
//! HttpRequest
//!     → router.rs (walk entries in order)
//!     → predicate.rs (method / path / composite checks)
//!     → first matching entry's handler, or the fallback
//! ```
//!
//! Routers are built once at startup and never change afterwards, so a
//! single `Arc<Router>` serves every connection without locking.

mod error;
mod pattern;
mod predicate;
mod router;

pub use error::Error;
pub use pattern::PathPattern;
pub use predicate::{Predicate, PredicateFn};
pub use router::{Router, RouterBuilder, RoutingEntry};
