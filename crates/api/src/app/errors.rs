use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tokengate_auth::AuthFailure;

pub fn auth_failure_to_response(err: AuthFailure) -> axum::response::Response {
    match err {
        AuthFailure::InvalidCredentials => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "Invalid username or password.",
        ),
        AuthFailure::Issuance(e) => {
            tracing::error!("token issuance failed: {e}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "issuance_error",
                "Could not issue a token.",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
