//! Token codec: mint and verify HS256-signed bearer tokens.
//!
//! Both directions are pure functions of their inputs (plus the key held by
//! the codec). No I/O, no logging, no shared mutable state; callers decide
//! what to do with a failure.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind,
};
use thiserror::Error;

use crate::{Identity, TokenClaims, check_expiry};

/// Why a presented token was not accepted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    /// Not a structurally valid token (segments, base64, JSON, algorithm).
    #[error("malformed token")]
    Malformed,

    /// Well-formed, but the signature does not match the payload.
    #[error("bad token signature")]
    BadSignature,

    /// Correctly signed, but past its expiry time.
    #[error("token has expired")]
    Expired,
}

impl VerificationError {
    /// Stable short name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationError::Malformed => "malformed",
            VerificationError::BadSignature => "bad_signature",
            VerificationError::Expired => "expired",
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to encode token: {0}")]
pub struct EncodeError(#[from] jsonwebtoken::errors::Error);

/// Verification contract used by the enforcement layer.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, VerificationError>;
}

/// HMAC-SHA256 token codec over a single shared secret.
#[derive(Clone)]
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        // Expiry is checked by `check_expiry` against an explicit clock, at
        // millisecond precision; jsonwebtoken only understands integer `exp`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint a token for `identity` valid for `ttl` from now.
    pub fn encode(&self, identity: Identity, ttl: Duration) -> Result<String, EncodeError> {
        self.encode_at(identity, ttl, Utc::now()).map(|(token, _)| token)
    }

    /// Mint a token issued at `issued_at`; returns the token and its claims.
    pub fn encode_at(
        &self,
        identity: Identity,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<(String, TokenClaims), EncodeError> {
        let claims = TokenClaims::new(identity, issued_at, ttl);
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok((token, claims))
    }

    pub fn decode(&self, token: &str) -> Result<TokenClaims, VerificationError> {
        self.decode_at(token, Utc::now())
    }

    /// Verify structure, then signature, then expiry against `now`.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, VerificationError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => VerificationError::BadSignature,
                _ => VerificationError::Malformed,
            })?;

        check_expiry(&data.claims, now)?;
        Ok(data.claims)
    }
}

impl TokenVerifier for Hs256TokenCodec {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, VerificationError> {
        self.decode_at(token, now).map(TokenClaims::into_identity)
    }
}

impl core::fmt::Debug for Hs256TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}
