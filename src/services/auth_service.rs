use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::password::PasswordError;
use crate::auth::{AuthUser, PasswordHasher, TokenService};
use crate::database::models::{NewUser, User};
use crate::database::Store;
use crate::error::ApiError;
use crate::services::validation;
use crate::types::Role;

/// Same message for unknown email, unreadable hash and wrong password
const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: User,
}

/// Registration, login and bearer-token verification
pub struct AuthService {
    store: Arc<dyn Store>,
    tokens: Arc<TokenService>,
    passwords: PasswordHasher,
    require_strong_passwords: bool,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn Store>,
        tokens: Arc<TokenService>,
        passwords: PasswordHasher,
        require_strong_passwords: bool,
    ) -> Self {
        Self {
            store,
            tokens,
            passwords,
            require_strong_passwords,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User, ApiError> {
        let name = validation::require_text("name", request.name.as_deref())?;
        validation::validate_username(&name)?;
        let email = validation::normalize_email(request.email.as_deref().unwrap_or_default())?;
        let password = request.password.unwrap_or_default();
        validation::validate_password("password", &password, self.require_strong_passwords)?;

        if self.store.find_user_by_name_or_email(&name, &email).await?.is_some() {
            return Err(ApiError::conflict("Username or email already registered"));
        }

        let password_hash = self.passwords.hash(password).await?;
        let record = self
            .store
            .insert_user(NewUser {
                name,
                email,
                password_hash,
                role: Role::User,
            })
            .await?;

        info!("Registered user {} ({})", record.name, record.id);
        Ok(record.public())
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let email = validation::require_text("email", request.email.as_deref())?.to_lowercase();
        let password = match request.password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(ApiError::invalid_field("password", "is required")),
        };

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            warn!("Failed login: unknown email");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        };

        match self.passwords.verify(password, user.password_hash.clone()).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("Failed login for user {}: wrong password", user.id);
                return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
            }
            Err(PasswordError::InvalidHash) => {
                warn!("Failed login for user {}: stored password hash is unreadable", user.id);
                return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
            }
            Err(other) => return Err(other.into()),
        }

        let issued = self.tokens.issue(user.id, user.role())?;
        info!("User {} logged in", user.id);

        Ok(LoginResponse {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            user: user.public(),
        })
    }

    /// Decode a bearer token into the caller's identity
    pub fn authenticate(&self, token: Option<&str>) -> Result<AuthUser, ApiError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization token"))?;

        let claims = self.tokens.verify(token).map_err(|e| {
            debug!("Rejected bearer token: {}", e);
            ApiError::from(e)
        })?;

        Ok(AuthUser::from(claims))
    }
}
