//! Credential issuance (login).

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::{EncodeError, Hs256TokenCodec, Identity, IdentityStore};

/// Lifetime of every issued token.
pub const TOKEN_TTL: Duration = Duration::hours(1);

#[derive(Debug, Error)]
pub enum AuthFailure {
    /// Username or password did not match; deliberately does not say which.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Issuance(#[from] EncodeError),
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    /// Opaque bearer token for the client.
    pub token: String,
    /// Readable copy of the identity embedded in `token`.
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Checks a presented pair against the identity store and mints a token.
#[derive(Clone)]
pub struct CredentialIssuer {
    store: Arc<dyn IdentityStore>,
    codec: Hs256TokenCodec,
}

impl CredentialIssuer {
    pub fn new(store: Arc<dyn IdentityStore>, codec: Hs256TokenCodec) -> Self {
        Self { store, codec }
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<IssuedCredential, AuthFailure> {
        self.authenticate_at(username, password, Utc::now())
    }

    pub fn authenticate_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedCredential, AuthFailure> {
        let identity = self
            .store
            .lookup(username, password)
            .ok_or(AuthFailure::InvalidCredentials)?;

        let (token, claims) = self.codec.encode_at(identity.clone(), TOKEN_TTL, now)?;

        Ok(IssuedCredential {
            token,
            identity,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

impl core::fmt::Debug for CredentialIssuer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CredentialIssuer")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
