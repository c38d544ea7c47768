use reqwest::StatusCode;
use serde_json::{Value, json};

use tokengate_api::config::{Enforcement, EnforcementMode, GateConfig};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str, enforcement: Enforcement) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = tokengate_api::app::build_app(&GateConfig::new(jwt_secret, enforcement));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

const STRICT: Enforcement = Enforcement::Enabled(EnforcementMode::Strict);
const FLEXIBLE: Enforcement = Enforcement::Enabled(EnforcementMode::Flexible);

async fn login(client: &reqwest::Client, srv: &TestServer, username: &str, password: &str) -> reqwest::Response {
    client
        .post(srv.url("/api/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .unwrap()
}

async fn token(client: &reqwest::Client, srv: &TestServer) -> String {
    let body: Value = login(client, srv, "testuser", "password123").await.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_never_gated() {
    let srv = TestServer::spawn("test-secret", STRICT).await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let srv = TestServer::spawn("test-secret", STRICT).await;
    let client = reqwest::Client::new();

    let res = login(&client, &srv, "testuser", "password123").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert!(body["message"].is_string());
    assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);
    assert_eq!(body["user"], json!({ "id": 1, "name": "testuser", "role": "user" }));
}

#[tokio::test]
async fn login_failure_does_not_say_which_field() {
    let srv = TestServer::spawn("test-secret", STRICT).await;
    let client = reqwest::Client::new();

    let bad_password = login(&client, &srv, "testuser", "wrong").await;
    assert_eq!(bad_password.status(), StatusCode::UNAUTHORIZED);
    let bad_password: Value = bad_password.json().await.unwrap();

    let bad_user = login(&client, &srv, "mallory", "password123").await;
    assert_eq!(bad_user.status(), StatusCode::UNAUTHORIZED);
    let bad_user: Value = bad_user.json().await.unwrap();

    assert_eq!(bad_password, bad_user);
    assert!(bad_password.get("token").is_none());
}

#[tokio::test]
async fn strict_namespace_requires_token() {
    let srv = TestServer::spawn("test-secret", STRICT).await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/whoami")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(srv.url("/api/echomsg?msg=hi"))
        .bearer_auth("tampered.token.value")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn strict_identity_comes_from_token() {
    let srv = TestServer::spawn("test-secret", STRICT).await;
    let client = reqwest::Client::new();
    let token = token(&client, &srv).await;

    let body: Value = client
        .get(srv.url("/api/whoami"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["authStatus"], "authenticated");
    assert_eq!(body["user"]["name"], "testuser");
    assert_eq!(body["subject"], 1);
    assert_eq!(body["name"], "testuser");
    assert_eq!(body["role"], "user");

    let res = client
        .get(srv.url("/api/echomsg/hello"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["echoed"], "hello");
}

#[tokio::test]
async fn token_from_another_secret_is_forbidden() {
    let issuer = TestServer::spawn("secret-a", STRICT).await;
    let verifier = TestServer::spawn("secret-b", STRICT).await;
    let client = reqwest::Client::new();

    let token = token(&client, &issuer).await;
    let res = client
        .get(verifier.url("/api/whoami"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn flexible_annotates_instead_of_rejecting() {
    let srv = TestServer::spawn("test-secret", FLEXIBLE).await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/echomsg?msg=hi")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["received"], "hi");
    assert_eq!(body["authStatus"], "not authenticated");
    assert!(body.get("user").is_none());

    let res = client
        .post(srv.url("/api/reversemsg"))
        .bearer_auth("garbage")
        .json(&json!({ "message": "abc" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["reversed"], "cba");
    assert_eq!(body["authStatus"], "not authenticated");

    let token = token(&client, &srv).await;
    let body: Value = client
        .get(srv.url("/api/echomsg"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["echoed"], "No message provided");
    assert_eq!(body["authStatus"], "authenticated");
    assert_eq!(body["user"]["id"], 1);
}

#[tokio::test]
async fn disabled_namespace_is_open_and_unannotated() {
    let srv = TestServer::spawn("test-secret", Enforcement::Disabled).await;
    let client = reqwest::Client::new();

    for auth in [None, Some("Bearer garbage")] {
        let mut req = client.get(srv.url("/api/whoami"));
        if let Some(value) = auth {
            req = req.header(reqwest::header::AUTHORIZATION, value);
        }
        let res = req.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["enforced"], false);
        assert!(body.get("subject").is_none());
        assert!(body.get("authStatus").is_none());
        assert!(body.get("user").is_none());
    }

    // Login still works so clients can be rolled out ahead of enforcement.
    let res = login(&client, &srv, "testuser", "password123").await;
    assert_eq!(res.status(), StatusCode::OK);
}
