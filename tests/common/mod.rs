#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use canchas_api::config::AppConfig;
use canchas_api::database::Store;
use canchas_api::testing::MemoryStore;
use canchas_api::{app, AppState};

pub const PASSWORD: &str = "Passw0rd!";

/// Development preset with cheap password hashing and a fixed signing secret
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = "integration-test-secret".to_string();
    config.security.password_memory_kib = 1024;
    config.security.password_iterations = 1;
    config.security.enable_cors = false;
    config
}

/// The full router over a store (in-memory unless stated), driven in-process
pub struct TestApp<S = MemoryStore> {
    pub router: Router,
    pub store: Arc<S>,
}

pub struct Account {
    pub id: String,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Register `name` and promote it to admin before logging in
    pub async fn signup_admin(&self, name: &str) -> Result<Account> {
        let email = format!("{}@x.com", name);
        let (status, body) = self.register(name, &email, PASSWORD).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register {} failed: {}", name, body);
        let id = body["data"]["id"].as_str().context("user id")?.to_string();
        anyhow::ensure!(
            self.store.set_role(id.parse()?, canchas_api::types::Role::Admin).await,
            "promote {}",
            name
        );
        let token = self.token_for(&email).await?;
        Ok(Account { id, token })
    }
}

impl<S: Store + 'static> TestApp<S> {
    pub fn with_store(store: Arc<S>) -> Result<Self> {
        let config = test_config();
        let state = AppState::new(store.clone(), &config.security)?;
        Ok(Self {
            router: app(state, &config),
            store,
        })
    }

    /// Send a request and return the status plus the decoded body (`Null` when empty)
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body: {:?}", bytes))?
        };
        Ok((status, body))
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, path, token, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, path, token, None).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(StatusCode, Value)> {
        self.post("/users", None, json!({ "name": name, "email": email, "password": password }))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(StatusCode, Value)> {
        self.post("/users/login", None, json!({ "email": email, "password": password }))
            .await
    }

    /// Register `name` with email `<name>@x.com` and log in
    pub async fn signup(&self, name: &str) -> Result<Account> {
        let email = format!("{}@x.com", name);
        let (status, body) = self.register(name, &email, PASSWORD).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register {} failed: {}", name, body);
        let id = body["data"]["id"].as_str().context("user id")?.to_string();
        let token = self.token_for(&email).await?;
        Ok(Account { id, token })
    }

    async fn token_for(&self, email: &str) -> Result<String> {
        let (status, body) = self.login(email, PASSWORD).await?;
        anyhow::ensure!(status == StatusCode::OK, "login {} failed: {}", email, body);
        Ok(body["data"]["token"].as_str().context("token")?.to_string())
    }

    pub async fn create_court(&self, token: &str, name: &str) -> Result<i64> {
        let (status, body) = self.post("/courts", Some(token), court_body(name)).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create court failed: {}", body);
        body["data"]["id"].as_i64().context("court id")
    }

    pub async fn create_review(&self, token: &str, court_id: i64, rating: i64, comment: &str) -> Result<i64> {
        let (status, body) = self
            .post(
                &format!("/courts/{}/reviews", court_id),
                Some(token),
                json!({ "rating": rating, "comment": comment }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create review failed: {}", body);
        body["data"]["id"].as_i64().context("review id")
    }
}

pub fn court_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "Clay court with lights",
        "location": "Lima",
        "address": "Av. Arequipa 123",
        "price": 50
    })
}
