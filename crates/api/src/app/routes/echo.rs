//! Demo endpoints. Each one shapes its response from the request's
//! [`AuthDecision`] when the namespace is gated.

use axum::{
    Json,
    extract::{Extension, Path, Query},
};
use serde_json::{Value, json};

use crate::app::dto::{EchoQuery, ReverseRequest};
use crate::context::AuthDecision;

const NO_MESSAGE: &str = "No message provided";

pub async fn echo_query(
    decision: Option<Extension<AuthDecision>>,
    Query(q): Query<EchoQuery>,
) -> Json<Value> {
    let msg = q.msg.filter(|m| !m.is_empty()).unwrap_or_else(|| NO_MESSAGE.to_string());
    respond(json!({ "received": msg, "echoed": msg }), decision)
}

pub async fn echo_path(
    decision: Option<Extension<AuthDecision>>,
    Path(msg): Path<String>,
) -> Json<Value> {
    respond(json!({ "received": msg, "echoed": msg }), decision)
}

pub async fn reverse(
    decision: Option<Extension<AuthDecision>>,
    Json(req): Json<ReverseRequest>,
) -> Json<Value> {
    let reversed: String = req.message.chars().rev().collect();
    respond(json!({ "original": req.message, "reversed": reversed }), decision)
}

fn respond(mut body: Value, decision: Option<Extension<AuthDecision>>) -> Json<Value> {
    if let Some(Extension(decision)) = decision {
        decision.annotate(&mut body);
    }
    Json(body)
}
