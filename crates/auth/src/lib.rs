//! `tokengate-auth` — bearer token issuance and verification.
//!
//! This crate is intentionally decoupled from HTTP: it knows how to mint and
//! verify tokens and how to check a username/password pair, nothing more.

pub mod claims;
pub mod codec;
pub mod issuer;
pub mod principal;
pub mod roles;
pub mod store;

pub use claims::{TokenClaims, check_expiry};
pub use codec::{EncodeError, Hs256TokenCodec, TokenVerifier, VerificationError};
pub use issuer::{AuthFailure, CredentialIssuer, IssuedCredential, TOKEN_TTL};
pub use principal::{Identity, SubjectId};
pub use roles::Role;
pub use store::{IdentityStore, StaticIdentityStore};
