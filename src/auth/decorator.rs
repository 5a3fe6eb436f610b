//! Authentication and authorization in front of a handler.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::auth::authentication::Authentication;
use crate::auth::credentials::CredentialExtractor;
use crate::auth::identity::Identity;
use crate::auth::permissions::Permission;
use crate::parser::HttpRequest;
use crate::server::{BoxHandler, Handler, HandlerFuture, HttpResponse, StatusCode};

const DEFAULT_REALM: &str = "microroute";

/// Result of running the auth steps for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The wrapped handler may run on behalf of this identity.
    Allowed(Identity),
    /// No accepted credentials, and anonymous access is not permitted.
    Unauthenticated,
    /// Authenticated, but the identity lacks the required action.
    Forbidden(Identity),
}

/// Wraps a handler with one authentication and one authorization attempt.
///
/// A rejected request never reaches the wrapped handler. When no credentials
/// are accepted the anonymous identity is checked against the permission, so
/// an open configuration lets anonymous callers through.
#[derive(Clone)]
pub struct AuthHandler {
    origin: BoxHandler,
    credentials: Arc<dyn CredentialExtractor>,
    authentication: Arc<dyn Authentication>,
    permission: Permission,
    realm: String,
}

impl AuthHandler {
    pub fn new(
        origin: BoxHandler,
        credentials: Arc<dyn CredentialExtractor>,
        authentication: Arc<dyn Authentication>,
        permission: Permission,
    ) -> Self {
        Self {
            origin,
            credentials,
            authentication,
            permission,
            realm: DEFAULT_REALM.to_string(),
        }
    }

    /// Set the realm advertised in `WWW-Authenticate` on 401 responses.
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Identify the caller, or `None` if extraction or verification failed.
    pub fn authenticate(&self, request: &HttpRequest) -> Option<Identity> {
        let credentials = self.credentials.extract(request)?;
        self.authentication.user(&credentials.username, &credentials.password)
    }

    /// Run authentication then authorization without invoking the handler.
    pub fn check(&self, request: &HttpRequest) -> AuthOutcome {
        match self.authenticate(request) {
            None if self.permission.allowed(&Identity::Anonymous) => AuthOutcome::Allowed(Identity::Anonymous),
            None => AuthOutcome::Unauthenticated,
            Some(identity) if self.permission.allowed(&identity) => AuthOutcome::Allowed(identity),
            Some(identity) => AuthOutcome::Forbidden(identity),
        }
    }

    fn unauthorized(&self) -> HttpResponse {
        HttpResponse::new(StatusCode::Unauthorized)
            .with_header("WWW-Authenticate", format!("Basic realm=\"{}\"", self.realm))
    }
}

impl Handler for AuthHandler {
    fn handle(&self, request: HttpRequest) -> HandlerFuture {
        match self.check(&request) {
            AuthOutcome::Allowed(identity) => {
                debug!(
                    "{identity} allowed to {action} {path}",
                    action = self.permission.action(),
                    path = request.path
                );
                self.origin.handle(request)
            }
            AuthOutcome::Unauthenticated => {
                warn!("Unauthenticated {method} {path} rejected", method = request.method, path = request.path);
                let response = self.unauthorized();
                Box::pin(async move { Ok(response) })
            }
            AuthOutcome::Forbidden(identity) => {
                warn!(
                    "{identity} lacks {action} permission for {path}",
                    action = self.permission.action(),
                    path = request.path
                );
                Box::pin(async { Ok(HttpResponse::new(StatusCode::Forbidden)) })
            }
        }
    }
}

impl fmt::Debug for AuthHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHandler")
            .field("permission", &self.permission)
            .field("realm", &self.realm)
            .finish_non_exhaustive()
    }
}
