mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn legacy_mode_lets_any_caller_mutate_any_user() -> Result<()> {
    let server = TestServer::spawn().await?;
    let victim = server.sign_up("victim@example.com", "secret").await?;
    let other = server.sign_up("other@example.com", "secret").await?;
    let token = server.token_for(other);

    let updated = server
        .client
        .put(server.url("/user"))
        .bearer_auth(&token)
        .json(&json!({ "id": victim, "name": "v", "email": "victim@example.com", "password": "changed" }))
        .send()
        .await?;
    assert_eq!(updated.status(), StatusCode::CREATED);

    let deleted = server
        .client
        .delete(server.url("/user"))
        .bearer_auth(&token)
        .json(&json!({ "id": victim }))
        .send()
        .await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn ownership_flag_restricts_users_to_themselves() -> Result<()> {
    let mut config = common::test_config();
    config.security.enforce_user_ownership = true;
    let server = TestServer::spawn_with(config).await?;

    let victim = server.sign_up("victim@example.com", "secret").await?;
    let other = server.sign_up("other@example.com", "secret").await?;

    let denied = server
        .client
        .put(server.url("/user"))
        .bearer_auth(server.token_for(other))
        .json(&json!({ "id": victim, "name": "v", "email": "victim@example.com", "password": "changed" }))
        .send()
        .await?;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let denied = server
        .client
        .delete(server.url("/user"))
        .bearer_auth(server.token_for(other))
        .json(&json!({ "id": victim }))
        .send()
        .await?;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    let body: Value = denied.json().await?;
    assert_eq!(body["msg"], "You don't have permission for delete");

    let own = server
        .client
        .delete(server.url("/user"))
        .bearer_auth(server.token_for(victim))
        .json(&json!({ "id": victim }))
        .send()
        .await?;
    assert_eq!(own.status(), StatusCode::NO_CONTENT);
    Ok(())
}
