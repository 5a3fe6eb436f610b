//! Authentication and authorization for protected handlers.
//!
//! # Data Flow
//! ```text
//! HttpRequest
//!     → credentials.rs (Authorization header → Credentials)
//!     → authentication.rs (Credentials → Identity)
//!     → permissions.rs (Identity + Action → allow/deny)
//!     → decorator.rs (401 / 403 / wrapped handler)
//! ```
//!
//! Each step is a trait so it can be replaced and tested on its own.

mod authentication;
mod config;
mod credentials;
mod decorator;
mod identity;
mod permissions;

pub use authentication::{AcceptAll, Authentication, StaticUsers};
pub use config::AuthSettings;
pub use credentials::{BasicAuth, CredentialExtractor, decode_pair, encode_pair};
pub use decorator::{AuthHandler, AuthOutcome};
pub use identity::{ANONYMOUS, Action, Credentials, Identity};
pub use permissions::{EVERYONE, FreePermissions, Permission, Permissions, UserPermissions};
