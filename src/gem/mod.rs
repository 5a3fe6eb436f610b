//! Request routing for a Ruby gem repository.
//!
//! Two deployment variants share the same router contract:
//! [`native_router`] wires every endpoint to its own handler and guards
//! pushes and downloads with auth, while [`delegating_router`] hands
//! submissions to a single external handler. Storage, the push itself and
//! metadata rendering all live in the injected handlers.

mod api_key;
mod routes;

pub use api_key::GemApiKey;
pub use routes::{
    API_KEY_PATH, DEPENDENCIES_PATH, GemAuth, GemHandlers, INFO_PATTERNS, SUBMIT_PATH, delegating_router,
    native_router,
};
