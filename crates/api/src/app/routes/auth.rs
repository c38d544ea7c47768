use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    response::{IntoResponse, Response},
};

use tokengate_auth::{AuthFailure, CredentialIssuer};

use crate::app::dto::{LoginRequest, LoginResponse};
use crate::app::errors::auth_failure_to_response;

pub async fn login(
    Extension(issuer): Extension<Arc<CredentialIssuer>>,
    Json(req): Json<LoginRequest>,
) -> Response {
    match issuer.authenticate(&req.username, &req.password) {
        Ok(issued) => {
            tracing::info!(
                subject = %issued.identity.id,
                expires_at = %issued.expires_at,
                "credential issued"
            );
            Json(LoginResponse::from(issued)).into_response()
        }
        Err(err) => {
            if matches!(err, AuthFailure::InvalidCredentials) {
                tracing::warn!(username = %req.username, "login rejected");
            }
            auth_failure_to_response(err)
        }
    }
}
