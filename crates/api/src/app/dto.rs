//! Request/response bodies for the `/api` namespace.

use serde::{Deserialize, Serialize};

use tokengate_auth::{Identity, IssuedCredential};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: Identity,
}

impl From<IssuedCredential> for LoginResponse {
    fn from(issued: IssuedCredential) -> Self {
        Self {
            message: "Login successful.".to_string(),
            token: issued.token,
            user: issued.identity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EchoQuery {
    pub msg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReverseRequest {
    #[serde(default)]
    pub message: String,
}
