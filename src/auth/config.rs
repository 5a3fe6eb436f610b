//! Auth settings loaded from JSON.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::auth::authentication::{Authentication, StaticUsers};
use crate::auth::identity::{ANONYMOUS, Action};
use crate::auth::permissions::{EVERYONE, FreePermissions, Permissions, UserPermissions};
use crate::server::Error;

/// Users and their grants for one repository.
///
/// ```json
/// {
///   "users": { "alice": "wonderland" },
///   "permissions": { "alice": ["read", "write"], "*": ["read"] }
/// }
/// ```
///
/// With `"free": true` every request is allowed and `permissions` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub free: bool,
    pub users: BTreeMap<String, String>,
    pub permissions: BTreeMap<String, Vec<Action>>,
}

impl AuthSettings {
    /// Parse and validate settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Every grant must name a configured user, `*`, or `anonymous`.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(name) = self
            .permissions
            .keys()
            .find(|name| !self.users.contains_key(*name) && *name != EVERYONE && *name != ANONYMOUS)
        {
            return Err(Error::ConfigError(format!("permissions reference unknown user: {name}")));
        }
        Ok(())
    }

    pub fn authentication(&self) -> Arc<dyn Authentication> {
        Arc::new(self.users.iter().map(|(k, v)| (k.clone(), v.clone())).collect::<StaticUsers>())
    }

    pub fn permissions(&self) -> Arc<dyn Permissions> {
        if self.free {
            return Arc::new(FreePermissions);
        }
        Arc::new(
            self.permissions
                .iter()
                .fold(UserPermissions::new(), |acc, (name, actions)| acc.grant(name.clone(), actions.iter().copied())),
        )
    }
}
