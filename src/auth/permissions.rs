//! Authorization checks.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::auth::identity::{Action, Identity};

/// Grant key that applies to every identity, anonymous included.
pub const EVERYONE: &str = "*";

/// Decides whether an identity may perform an action on the repository a
/// router serves.
pub trait Permissions: Send + Sync {
    fn allowed(&self, identity: &Identity, action: Action) -> bool;
}

impl<F> Permissions for F
where
    F: Fn(&Identity, Action) -> bool + Send + Sync,
{
    fn allowed(&self, identity: &Identity, action: Action) -> bool {
        self(identity, action)
    }
}

/// Open configuration: everything is allowed, including anonymous access.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreePermissions;

impl Permissions for FreePermissions {
    fn allowed(&self, _identity: &Identity, _action: Action) -> bool {
        true
    }
}

/// Per-user grants, with [`EVERYONE`] applying to all callers.
#[derive(Debug, Clone, Default)]
pub struct UserPermissions {
    grants: HashMap<String, HashSet<Action>>,
}

impl UserPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, name: impl Into<String>, actions: impl IntoIterator<Item = Action>) -> Self {
        self.grants.entry(name.into()).or_default().extend(actions);
        self
    }

    /// Names that hold at least one grant.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.grants.keys().map(String::as_str)
    }

    fn grants(&self, name: &str, action: Action) -> bool {
        self.grants
            .get(name)
            .is_some_and(|actions| actions.contains(&action))
    }
}

impl Permissions for UserPermissions {
    fn allowed(&self, identity: &Identity, action: Action) -> bool {
        self.grants(identity.name(), action) || self.grants(EVERYONE, action)
    }
}

/// A permission check bound to one action.
#[derive(Clone)]
pub struct Permission {
    permissions: Arc<dyn Permissions>,
    action: Action,
}

impl Permission {
    pub fn new(permissions: Arc<dyn Permissions>, action: Action) -> Self {
        Self { permissions, action }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn allowed(&self, identity: &Identity) -> bool {
        self.permissions.allowed(identity, self.action)
    }
}

impl fmt::Debug for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permission")
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}
