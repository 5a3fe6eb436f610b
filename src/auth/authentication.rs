//! Credential verification.

use std::collections::HashMap;

use crate::auth::identity::Identity;

/// Turns a username and password into an identity.
///
/// Returning `None` means the credentials were not accepted.
pub trait Authentication: Send + Sync {
    fn user(&self, username: &str, password: &str) -> Option<Identity>;
}

impl<F> Authentication for F
where
    F: Fn(&str, &str) -> Option<Identity> + Send + Sync,
{
    fn user(&self, username: &str, password: &str) -> Option<Identity> {
        self(username, password)
    }
}

/// Accepts any credentials and names the caller anonymous.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Authentication for AcceptAll {
    fn user(&self, _username: &str, _password: &str) -> Option<Identity> {
        Some(Identity::Anonymous)
    }
}

/// A fixed table of users and passwords.
#[derive(Clone, Default)]
pub struct StaticUsers {
    users: HashMap<String, String>,
}

impl StaticUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.insert(username.into(), password.into());
        self
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticUsers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            users: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Authentication for StaticUsers {
    fn user(&self, username: &str, password: &str) -> Option<Identity> {
        self.users
            .get(username)
            .filter(|expected| constant_time_eq(expected.as_bytes(), password.as_bytes()))
            .map(|_| Identity::user(username))
    }
}

/// Compares two byte strings in time that depends only on their lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_users() {
        let users = StaticUsers::new().with_user("alice", "wonderland");
        assert_eq!(users.user("alice", "wonderland"), Some(Identity::user("alice")));
        assert_eq!(users.user("alice", "wrong"), None);
        assert_eq!(users.user("bob", "wonderland"), None);
        assert!(users.contains("alice"));
    }

    #[test]
    fn test_password_comparison() {
        assert!(constant_time_eq(b"wonderland", b"wonderland"));
        assert!(!constant_time_eq(b"wonderland", b"wonderlanD"));
        assert!(!constant_time_eq(b"wonderland", b"wonder"));
        assert!(constant_time_eq(b"", b""));

        let users = StaticUsers::new().with_user("alice", "wonderland");
        assert_eq!(users.user("alice", "wonderlanD"), None);
        assert_eq!(users.user("alice", ""), None);
    }

    #[test]
    fn test_accept_all() {
        assert_eq!(AcceptAll.user("anyone", ""), Some(Identity::Anonymous));
    }

    #[test]
    fn test_closure_authentication() {
        let auth = |user: &str, _pwd: &str| (user == "ci").then(|| Identity::user("ci"));
        assert_eq!(auth.user("ci", "x"), Some(Identity::user("ci")));
        assert_eq!(auth.user("other", "x"), None);
    }
}
