//! Tests for JWT authentication and account endpoints

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use jsonwebtoken::{DecodingKey, Validation, decode};
use linkup::config::ConfigBuilder;
use linkup::core::NetworkManager;
use linkup::storage::InMemoryStore;
use linkup_server::{api::auth::Claims, config::ServerConfig, state::AppState};
use serde_json::{Value, json};

const SECRET: &str = "test-secret-key-for-jwt-token-generation";

fn create_test_server_with(configure: impl FnOnce(&mut ServerConfig)) -> TestServer {
    let config = ConfigBuilder::testing()
        .build()
        .expect("Failed to create config");
    let network = NetworkManager::new(Arc::new(InMemoryStore::new()), config);

    let mut server_config = ServerConfig {
        jwt_secret: SECRET.to_string(),
        bcrypt_cost: 4,
        ..Default::default()
    };
    configure(&mut server_config);

    let state = Arc::new(AppState::new(network, server_config));
    TestServer::new(linkup_server::create_router(state)).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(|_| {})
}

#[tokio::test]
async fn test_signup_returns_token_and_profile() {
    let server = create_test_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "name": "Ada Lovelace",
            "email": "Ada@Example.com",
            "password": "analytical",
            "title": "Engineer"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["connections"], 0);
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().unwrap();
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(SECRET.as_ref()),
        &Validation::default(),
    )
    .unwrap()
    .claims;
    assert_eq!(claims.sub, body["user"]["id"].as_str().unwrap());
    assert_eq!(claims.email, "ada@example.com");
}

#[tokio::test]
async fn test_signup_rejects_duplicates_and_short_passwords() {
    let server = create_test_server();
    let signup = json!({"name": "Ada", "email": "ada@example.com", "password": "analytical"});

    server
        .post("/api/auth/signup")
        .json(&signup)
        .await
        .assert_status(StatusCode::CREATED);

    let duplicate = server
        .post("/api/auth/signup")
        .json(&json!({"name": "Other", "email": " ADA@example.com", "password": "analytical"}))
        .await;
    duplicate.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = duplicate.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already registered");

    server
        .post("/api/auth/signup")
        .json(&json!({"name": "Bob", "email": "bob@example.com", "password": "123"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/auth/signup")
        .json(&json!({"name": " ", "email": "cy@example.com", "password": "longenough"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_disabled() {
    let server = create_test_server_with(|config| config.allow_signup = false);

    let response = server
        .post("/api/auth/signup")
        .json(&json!({"name": "Ada", "email": "ada@example.com", "password": "analytical"}))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], "User signup is disabled");
}

#[tokio::test]
async fn test_login_and_me() {
    let server = create_test_server();
    server
        .post("/api/auth/signup")
        .json(&json!({"name": "Ada", "email": "ada@example.com", "password": "analytical"}))
        .await
        .assert_status(StatusCode::CREATED);

    let login = server
        .post("/api/auth/login")
        .json(&json!({"email": "ADA@example.com", "password": "analytical"}))
        .await;
    login.assert_status_ok();
    let token = login.json::<Value>()["token"].as_str().unwrap().to_string();

    let me = server
        .get("/api/auth/me")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    me.assert_status_ok();
    let body: Value = me.json();
    assert_eq!(body["data"]["name"], "Ada");
}

#[tokio::test]
async fn test_login_with_bad_credentials() {
    let server = create_test_server();
    server
        .post("/api/auth/signup")
        .json(&json!({"name": "Ada", "email": "ada@example.com", "password": "analytical"}))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/api/auth/login")
        .json(&json!({"email": "ada@example.com", "password": "wrong-password"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let unknown = server
        .post("/api/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "analytical"}))
        .await;
    unknown.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.json::<Value>()["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_protected_routes_require_a_valid_token() {
    let server = create_test_server();

    server
        .get("/api/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post("/api/posts")
        .json(&json!({"content": "hello"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/api/messages")
        .add_header("Authorization", "Bearer not-a-jwt")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // Public routes stay public
    server.get("/api/posts").await.assert_status_ok();
    server.get("/api/users").await.assert_status_ok();
}

#[tokio::test]
async fn test_token_signed_with_another_secret_is_rejected() {
    let server = create_test_server();
    let other = create_test_server_with(|config| config.jwt_secret = "another-secret".to_string());

    let signup = other
        .post("/api/auth/signup")
        .json(&json!({"name": "Ada", "email": "ada@example.com", "password": "analytical"}))
        .await;
    let token = signup.json::<Value>()["token"].as_str().unwrap().to_string();

    server
        .get("/api/auth/me")
        .add_header("Authorization", format!("Bearer {}", token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
