//! Identity store: the lookup the issuer consults at login.
//!
//! Real deployments would put an identity provider behind [`IdentityStore`];
//! the gate ships a fixed-pair store.

use crate::{Identity, Role};

/// Resolve a username/password pair to an identity.
///
/// Implementations must not reveal (through the return value) which of the
/// two fields was wrong.
pub trait IdentityStore: Send + Sync {
    fn lookup(&self, username: &str, password: &str) -> Option<Identity>;
}

/// A store holding exactly one fixed account.
#[derive(Clone)]
pub struct StaticIdentityStore {
    username: String,
    password: String,
    identity: Identity,
}

impl StaticIdentityStore {
    pub const DEFAULT_USERNAME: &'static str = "testuser";
    pub const DEFAULT_PASSWORD: &'static str = "password123";

    pub fn new(username: impl Into<String>, password: impl Into<String>, identity: Identity) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            identity,
        }
    }
}

impl Default for StaticIdentityStore {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_USERNAME,
            Self::DEFAULT_PASSWORD,
            Identity::new(1, Self::DEFAULT_USERNAME, Role::USER),
        )
    }
}

impl IdentityStore for StaticIdentityStore {
    fn lookup(&self, username: &str, password: &str) -> Option<Identity> {
        // Evaluate both comparisons; no early exit on the username.
        let user_ok = self.username == username;
        let pass_ok = self.password == password;
        (user_ok & pass_ok).then(|| self.identity.clone())
    }
}

impl core::fmt::Debug for StaticIdentityStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StaticIdentityStore")
            .field("username", &self.username)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
