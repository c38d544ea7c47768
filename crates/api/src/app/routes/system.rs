use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::context::AuthDecision;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Report what the gate concluded about this request.
pub async fn whoami(decision: Option<Extension<AuthDecision>>) -> impl IntoResponse {
    let mut body = json!({
        "authenticated": decision.as_ref().is_some_and(|d| d.is_authenticated()),
        "enforced": decision.is_some(),
    });
    if let Some(Extension(decision)) = &decision {
        if let Some(ctx) = decision.identity() {
            body["subject"] = json!(ctx.subject_id().get());
            body["name"] = json!(ctx.name());
            body["role"] = json!(ctx.role().as_str());
        }
        decision.annotate(&mut body);
    }
    Json(body)
}
