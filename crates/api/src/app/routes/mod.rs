use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod echo;
pub mod system;

/// Path of the login route inside the namespace. Never gated.
pub const LOGIN_PATH: &str = "/login";

/// Router for every gated endpoint of the namespace (login excluded).
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/echomsg", get(echo::echo_query))
        .route("/echomsg/:msg", get(echo::echo_path))
        .route("/reversemsg", post(echo::reverse))
}
