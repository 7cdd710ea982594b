#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use houser::auth::TokenService;
use houser::config::AppConfig;
use houser::state::AppState;
use houser::testing::MemoryStore;

pub const JWT_SECRET: &str = "integration-test-secret";

/// The real router served on an ephemeral port, backed by a `MemoryStore`.
pub struct TestServer {
    pub base_url: String,
    pub store: MemoryStore,
    pub client: reqwest::Client,
    tokens: TokenService,
    handle: tokio::task::JoinHandle<()>,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = JWT_SECRET.to_string();
    config.security.bcrypt_cost = 4;
    config.api.enable_request_logging = false;
    config
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(test_config()).await
    }

    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        let store = MemoryStore::new();
        let state = AppState::new(Arc::new(store.clone()), &config)?;
        let tokens = state.tokens.clone();
        let app = houser::app(state, &config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self {
            base_url: format!("http://{}/api/v1", addr),
            store,
            client: reqwest::Client::new(),
            tokens,
            handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn root_url(&self, path: &str) -> String {
        let root = self.base_url.trim_end_matches("/api/v1");
        format!("{}{}", root, path)
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.tokens.issue(user_id).unwrap()
    }

    pub fn expired_token_for(&self, user_id: Uuid) -> String {
        self.tokens
            .issue_until(user_id, Utc::now() - Duration::minutes(5))
            .unwrap()
    }

    /// Register through the API and return the new user's id.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Uuid> {
        let res = self
            .client
            .post(self.url("/sign-up"))
            .json(&json!({ "name": "Test", "email": email, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "sign-up failed: {}", res.status());

        let body: Value = res.json().await?;
        let id = body["user"]["id"].as_str().context("sign-up response has no user id")?;
        Ok(Uuid::parse_str(id)?)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/sign-in"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Create a house owned by the token subject and return its id.
    pub async fn create_house(&self, token: &str, address: &str) -> Result<Uuid> {
        let res = self
            .client
            .post(self.url("/house"))
            .bearer_auth(token)
            .json(&json!({ "description": "test house", "address": address }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "house create failed: {}", res.status());

        let body: Value = res.json().await?;
        let id = body["house"]["id"].as_str().context("house response has no id")?;
        Ok(Uuid::parse_str(id)?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
