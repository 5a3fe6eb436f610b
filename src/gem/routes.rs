//! Routing tables for a gem repository.

use std::sync::Arc;

use log::info;

use crate::auth::{
    AcceptAll, Action, AuthHandler, AuthSettings, Authentication, CredentialExtractor, FreePermissions, Permission,
    Permissions,
};
use crate::gem::api_key::GemApiKey;
use crate::parser::Method;
use crate::routing::{Error, Predicate, Router};
use crate::server::{BoxHandler, boxed};

/// Endpoint `gem push` uploads to.
pub const SUBMIT_PATH: &str = "/api/v1/gems";
/// Endpoint bundler queries for dependency lists.
pub const DEPENDENCIES_PATH: &str = "/api/v1/dependencies";
/// Endpoint `gem signin` fetches an API key from.
pub const API_KEY_PATH: &str = "/api/v1/api_key";
/// Gem metadata, in either JSON or YAML.
pub const INFO_PATTERNS: [&str; 2] = ["/api/v1/gems/{gem}.json", "/api/v1/gems/{gem}.yaml"];

/// The handlers a repository plugs into its router.
#[derive(Clone)]
pub struct GemHandlers {
    pub submit: BoxHandler,
    pub dependencies: BoxHandler,
    pub api_key: BoxHandler,
    pub info: BoxHandler,
    pub download: BoxHandler,
}

/// How protected gem routes identify and authorize callers.
#[derive(Clone)]
pub struct GemAuth {
    credentials: Arc<dyn CredentialExtractor>,
    authentication: Arc<dyn Authentication>,
    permissions: Arc<dyn Permissions>,
}

impl GemAuth {
    pub fn new(authentication: Arc<dyn Authentication>, permissions: Arc<dyn Permissions>) -> Self {
        Self {
            credentials: Arc::new(GemApiKey),
            authentication,
            permissions,
        }
    }

    /// Open repository: everyone may read and push.
    pub fn anonymous() -> Self {
        Self::new(Arc::new(AcceptAll), Arc::new(FreePermissions))
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(settings.authentication(), settings.permissions())
    }

    /// Replace the default gem API key extraction.
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialExtractor>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Put `handler` behind authentication and a check for `action`.
    pub fn protect(&self, handler: BoxHandler, action: Action) -> BoxHandler {
        boxed(
            AuthHandler::new(
                handler,
                self.credentials.clone(),
                self.authentication.clone(),
                Permission::new(self.permissions.clone(), action),
            )
            .with_realm("gems"),
        )
    }
}

fn info_predicate() -> Result<Predicate, Error> {
    let paths = INFO_PATTERNS
        .iter()
        .map(|pattern| Predicate::path(pattern))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Predicate::all([Predicate::method(Method::GET), Predicate::any(paths)]))
}

/// The full repository: native handlers, with pushes and downloads behind auth.
///
/// Order matters: the download entry accepts every `GET`, so the specific
/// `GET` endpoints must come before it.
pub fn native_router(handlers: GemHandlers, auth: &GemAuth) -> Result<Router, Error> {
    let router = Router::builder()
        .route(
            Predicate::route(Method::POST, SUBMIT_PATH)?,
            auth.protect(handlers.submit, Action::Write),
        )
        .route(Predicate::route(Method::GET, DEPENDENCIES_PATH)?, handlers.dependencies)
        .route(Predicate::route(Method::GET, API_KEY_PATH)?, handlers.api_key)
        .route(info_predicate()?, handlers.info)
        .route(
            Predicate::method(Method::GET),
            auth.protect(handlers.download, Action::Read),
        )
        .build();

    log_routes("native", &router);
    Ok(router)
}

/// A minimal repository that hands pushes wholesale to one handler, which
/// does its own checks, and serves gem info. Everything else is not found.
pub fn delegating_router(submit: BoxHandler, info: BoxHandler) -> Result<Router, Error> {
    let router = Router::builder()
        .route(Predicate::route(Method::POST, SUBMIT_PATH)?, submit)
        .route(info_predicate()?, info)
        .build();

    log_routes("delegating", &router);
    Ok(router)
}

fn log_routes(variant: &str, router: &Router) {
    info!("Built {variant} gem router with {count} routes:", count = router.entries().len());
    for entry in router.entries() {
        info!("  {predicate}", predicate = entry.predicate);
    }
}
