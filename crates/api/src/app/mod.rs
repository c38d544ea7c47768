//! HTTP application wiring (Axum router).
//!
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Router, routing::get};

use tokengate_auth::{CredentialIssuer, Hs256TokenCodec, IdentityStore, StaticIdentityStore};

use crate::binder::RouteBinder;
use crate::config::GateConfig;

pub mod dto;
pub mod errors;
pub mod routes;

/// Prefix of the namespace the enforcement configuration applies to.
pub const API_PREFIX: &str = "/api";

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &GateConfig) -> Router {
    build_app_with_store(config, Arc::new(StaticIdentityStore::default()))
}

/// Same as [`build_app`], with a caller-supplied identity store.
pub fn build_app_with_store(config: &GateConfig, store: Arc<dyn IdentityStore>) -> Router {
    let codec = Hs256TokenCodec::new(config.jwt_secret.as_bytes());
    let issuer = Arc::new(CredentialIssuer::new(store, codec.clone()));
    let binder = RouteBinder::new(config.enforcement, Arc::new(codec), issuer);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest(API_PREFIX, binder.bind(routes::router()))
}
