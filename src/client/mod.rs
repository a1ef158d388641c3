//! Typed HTTP client for the Canchas API.
//!
//! Every protected call takes the bearer token explicitly; the client keeps
//! no session state of its own.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Court, CourtDetail, Review, User};
use crate::services::{
    CourtRequest, LoginRequest, LoginResponse, RegisterRequest, ReviewRequest, UpdateProfileRequest,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error envelope
    #[error("{message} (HTTP {status}, {code})")]
    Api { status: u16, code: String, message: String },
}

impl ClientError {
    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let parsed = url::Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!("{}: unsupported scheme", base_url)));
        }

        let http = Client::builder()
            .user_agent(concat!("canchas-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Accounts

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ClientError> {
        let body = RegisterRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        self.send(self.http.post(self.url("/users")).json(&body)).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        self.send(self.http.post(self.url("/users/login")).json(&body)).await
    }

    pub async fn me(&self, token: &str) -> Result<User, ClientError> {
        self.send(self.http.get(self.url("/users/me")).bearer_auth(token)).await
    }

    pub async fn update_me(&self, token: &str, changes: &UpdateProfileRequest) -> Result<User, ClientError> {
        self.send(self.http.put(self.url("/users/me")).bearer_auth(token).json(changes))
            .await
    }

    pub async fn my_courts(&self, token: &str) -> Result<Vec<Court>, ClientError> {
        self.send(self.http.get(self.url("/users/me/courts")).bearer_auth(token))
            .await
    }

    pub async fn my_reviews(&self, token: &str) -> Result<Vec<Review>, ClientError> {
        self.send(self.http.get(self.url("/users/me/reviews")).bearer_auth(token))
            .await
    }

    // Courts

    pub async fn list_courts(&self) -> Result<Vec<Court>, ClientError> {
        self.send(self.http.get(self.url("/courts"))).await
    }

    pub async fn get_court(&self, id: i64) -> Result<CourtDetail, ClientError> {
        self.send(self.http.get(self.url(&format!("/courts/{}", id)))).await
    }

    pub async fn create_court(&self, token: &str, court: &CourtRequest) -> Result<Court, ClientError> {
        self.send(self.http.post(self.url("/courts")).bearer_auth(token).json(court))
            .await
    }

    pub async fn update_court(&self, token: &str, id: i64, changes: &CourtRequest) -> Result<Court, ClientError> {
        let url = self.url(&format!("/courts/{}", id));
        self.send(self.http.put(url).bearer_auth(token).json(changes)).await
    }

    pub async fn delete_court(&self, token: &str, id: i64) -> Result<(), ClientError> {
        let url = self.url(&format!("/courts/{}", id));
        self.send_empty(self.http.delete(url).bearer_auth(token)).await
    }

    // Reviews

    pub async fn list_reviews(&self, court_id: i64) -> Result<Vec<Review>, ClientError> {
        self.send(self.http.get(self.url(&format!("/courts/{}/reviews", court_id))))
            .await
    }

    pub async fn create_review(&self, token: &str, court_id: i64, rating: i32, comment: &str) -> Result<Review, ClientError> {
        let body = ReviewRequest {
            rating: Some(rating),
            comment: Some(comment.to_string()),
        };
        let url = self.url(&format!("/courts/{}/reviews", court_id));
        self.send(self.http.post(url).bearer_auth(token).json(&body)).await
    }

    pub async fn update_review(&self, token: &str, id: i64, changes: &ReviewRequest) -> Result<Review, ClientError> {
        let url = self.url(&format!("/reviews/{}", id));
        self.send(self.http.put(url).bearer_auth(token).json(changes)).await
    }

    pub async fn delete_review(&self, token: &str, id: i64) -> Result<(), ClientError> {
        let url = self.url(&format!("/reviews/{}", id));
        self.send_empty(self.http.delete(url).bearer_auth(token)).await
    }

    // Administration

    pub async fn list_users(&self, token: &str) -> Result<Vec<User>, ClientError> {
        self.send(self.http.get(self.url("/admin/users")).bearer_auth(token))
            .await
    }

    pub async fn delete_user(&self, token: &str, id: Uuid) -> Result<(), ClientError> {
        let url = self.url(&format!("/admin/users/{}", id));
        self.send_empty(self.http.delete(url).bearer_auth(token)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => ClientError::Api {
            status: status.as_u16(),
            code: envelope.code.unwrap_or_else(|| "UNKNOWN".to_string()),
            message: envelope.message,
        },
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            code: "UNKNOWN".to_string(),
            message: status.canonical_reason().unwrap_or("Unexpected response").to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_base_urls() {
        assert!(matches!(ApiClient::new("not a url"), Err(ClientError::InvalidUrl(_))));
        assert!(matches!(ApiClient::new("ftp://example.com"), Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.url("/courts"), "http://localhost:3000/courts");
    }

    #[test]
    fn api_error_exposes_status() {
        let err = ClientError::Api {
            status: 403,
            code: "FORBIDDEN".to_string(),
            message: "nope".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.to_string(), "nope (HTTP 403, FORBIDDEN)");
    }
}
