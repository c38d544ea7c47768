//! Route binder: puts the enforcement middleware in front of a namespace.

use std::sync::Arc;

use axum::{Extension, Router, routing::post};

use tokengate_auth::{CredentialIssuer, TokenVerifier};

use crate::app::routes::{self, LOGIN_PATH};
use crate::config::Enforcement;
use crate::middleware::{self, EnforcementState};

#[derive(Clone)]
pub struct RouteBinder {
    enforcement: Enforcement,
    verifier: Arc<dyn TokenVerifier>,
    issuer: Arc<CredentialIssuer>,
}

impl RouteBinder {
    pub fn new(
        enforcement: Enforcement,
        verifier: Arc<dyn TokenVerifier>,
        issuer: Arc<CredentialIssuer>,
    ) -> Self {
        Self {
            enforcement,
            verifier,
            issuer,
        }
    }

    /// Bind `gated` plus the login route into one namespace router.
    ///
    /// The middleware layer is applied to `gated` only, before the login
    /// route is merged in, so login is reachable without a credential in
    /// every configuration. With enforcement disabled no layer is added.
    pub fn bind(&self, gated: Router) -> Router {
        let gated = match self.enforcement {
            Enforcement::Disabled => {
                tracing::info!("enforcement disabled; namespace is not gated");
                gated
            }
            Enforcement::Enabled(mode) => {
                tracing::info!(%mode, "enforcement enabled");
                gated.layer(axum::middleware::from_fn_with_state(
                    EnforcementState::new(self.verifier.clone(), mode),
                    middleware::enforce,
                ))
            }
        };

        let login = Router::new()
            .route(LOGIN_PATH, post(routes::auth::login))
            .layer(Extension(self.issuer.clone()));

        login.merge(gated)
    }
}
