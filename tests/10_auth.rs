mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn root_and_health_respond() -> Result<()> {
    let server = TestServer::spawn().await?;

    let root = server.client.get(server.root_url("/")).send().await?;
    assert_eq!(root.status(), StatusCode::OK);
    assert_eq!(root.text().await?, "App running");

    let health = server.client.get(server.root_url("/health")).send().await?;
    assert_eq!(health.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn sign_up_with_bad_email_reports_field() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/sign-up"))
        .json(&json!({ "name": "Jane", "email": "not-an-email", "password": "secret" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], true);
    assert!(body["fields"]["email"].as_str().unwrap().contains("valid email"));
    Ok(())
}

#[tokio::test]
async fn sign_up_never_returns_password() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/sign-up"))
        .json(&json!({ "name": "Jane", "email": "jane@example.com", "password": "secret" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], false);
    assert_eq!(body["user"]["email"], "jane@example.com");
    assert!(body["user"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn sign_up_then_sign_in_yields_usable_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user_id = server.sign_up("jane@example.com", "secret").await?;

    let res = server.sign_in("jane@example.com", "secret").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let token = body["access_token"].as_str().unwrap().to_string();

    let claims = houser::auth::TokenService::new(common::JWT_SECRET, 15)?.verify(&token)?;
    assert_eq!(claims.user_id, user_id);
    assert!(!claims.is_expired(chrono::Utc::now()));

    let house = server
        .client
        .post(server.url("/house"))
        .bearer_auth(&token)
        .json(&json!({ "description": "cottage", "address": "1 Lane" }))
        .send()
        .await?;
    assert_eq!(house.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.sign_up("jane@example.com", "secret").await?;

    for (email, password) in [("jane@example.com", "wrong"), ("nobody@example.com", "secret")] {
        let res = server.sign_in(email, password).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = res.json().await?;
        assert_eq!(body["msg"], "user with the given email and password is not found");
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_sign_up_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.sign_up("jane@example.com", "secret").await?;

    let res = server
        .client
        .post(server.url("/sign-up"))
        .json(&json!({ "name": "Jane", "email": "jane@example.com", "password": "secret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/sign-in"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn legacy_plaintext_passwords_still_sign_in() -> Result<()> {
    let mut config = common::test_config();
    config.security.legacy_plaintext_passwords = true;
    let server = TestServer::spawn_with(config).await?;
    server.sign_up("jane@example.com", "secret").await?;

    let res = server.sign_in("jane@example.com", "secret").await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
