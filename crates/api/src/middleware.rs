use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use tokengate_auth::{Identity, TokenVerifier, VerificationError};

use crate::app::errors::json_error;
use crate::config::EnforcementMode;
use crate::context::{AuthDecision, IdentityContext};

#[derive(Clone)]
pub struct EnforcementState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub mode: EnforcementMode,
}

impl EnforcementState {
    pub fn new(verifier: Arc<dyn TokenVerifier>, mode: EnforcementMode) -> Self {
        Self { verifier, mode }
    }
}

/// Result of looking for and checking a credential on one request.
#[derive(Debug)]
enum Outcome {
    Absent,
    Invalid(VerificationError),
    Verified(Identity),
}

/// Gate a request according to the configured [`EnforcementMode`].
///
/// Strict: 401 without a credential, 403 with an invalid one; otherwise the
/// handler always sees an [`IdentityContext`]. Flexible: the handler always
/// runs and reads the [`AuthDecision`] to know what it got.
pub async fn enforce(
    State(state): State<EnforcementState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let outcome = match extract_bearer(req.headers()) {
        None => Outcome::Absent,
        Some(token) => match state.verifier.verify(token, Utc::now()) {
            Ok(identity) => Outcome::Verified(identity),
            Err(e) => Outcome::Invalid(e),
        },
    };

    let decision = match (state.mode, outcome) {
        (mode, Outcome::Verified(identity)) => {
            let ctx = IdentityContext::new(identity);
            tracing::debug!(subject = %ctx.subject_id(), %mode, "credential verified");
            if mode == EnforcementMode::Strict {
                req.extensions_mut().insert(ctx.clone());
            }
            AuthDecision::Authenticated(ctx)
        }
        (EnforcementMode::Strict, Outcome::Absent) => {
            tracing::debug!(path = %req.uri().path(), "rejected: no credential");
            return json_error(
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                "Access denied: an authentication token is required.",
            );
        }
        (EnforcementMode::Strict, Outcome::Invalid(e)) => {
            tracing::warn!(path = %req.uri().path(), kind = e.kind(), "rejected: {e}");
            return json_error(
                StatusCode::FORBIDDEN,
                "forbidden",
                "Access denied: the token is invalid or expired.",
            );
        }
        (EnforcementMode::Flexible, Outcome::Absent) => {
            tracing::debug!(path = %req.uri().path(), "continuing unauthenticated: no credential");
            AuthDecision::Anonymous
        }
        (EnforcementMode::Flexible, Outcome::Invalid(e)) => {
            tracing::warn!(path = %req.uri().path(), kind = e.kind(), "continuing unauthenticated: {e}");
            AuthDecision::Anonymous
        }
    };

    req.extensions_mut().insert(decision);
    next.run(req).await
}

/// Second whitespace-separated segment of `Authorization`, if any.
///
/// The scheme word is not checked. A missing header, a header without a
/// second segment, or a non-UTF-8 value all count as no credential.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_whitespace()
        .nth(1)
}
