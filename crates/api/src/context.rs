use serde_json::{Value, json};

use tokengate_auth::{Identity, Role, SubjectId};

/// Verified identity attached to a request.
///
/// Created by the enforcement middleware, read-only to handlers, dropped with
/// the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    identity: Identity,
}

impl IdentityContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn subject_id(&self) -> SubjectId {
        self.identity.id
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn role(&self) -> &Role {
        &self.identity.role
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

/// Per-request enforcement outcome.
///
/// Inserted on every request the middleware lets through. Requests on a
/// namespace without the middleware carry no decision at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Authenticated(IdentityContext),
    Anonymous,
}

impl AuthDecision {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthDecision::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&IdentityContext> {
        match self {
            AuthDecision::Authenticated(ctx) => Some(ctx),
            AuthDecision::Anonymous => None,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_authenticated() {
            "authenticated"
        } else {
            "not authenticated"
        }
    }

    /// Add `authStatus` (and `user`, when authenticated) to a JSON object body.
    pub fn annotate(&self, body: &mut Value) {
        let Some(obj) = body.as_object_mut() else {
            return;
        };
        obj.insert("authStatus".into(), json!(self.status_label()));
        if let Some(ctx) = self.identity() {
            obj.insert("user".into(), json!(ctx.identity()));
        }
    }
}
