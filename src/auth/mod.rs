pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::types::Role;

pub use password::PasswordHasher;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Authenticated identity attached to a request by the auth middleware
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

impl AuthUser {
    /// Owners and admins may mutate a resource
    pub fn can_modify(&self, owner: Uuid) -> bool {
        self.id == owner || self.role.is_elevated()
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(String),
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// A freshly signed token and its lifetime in seconds
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Signs and verifies HS256 bearer tokens. Built once at startup from the
/// configured secret; the server keeps no session state.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expiry_minutes: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry: Duration::minutes(expiry_minutes as i64),
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiry_minutes)
    }

    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            exp: (now + self.expiry).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in: self.expiry.num_seconds(),
        })
    }

    /// Check signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let service = TokenService::new("test-secret", 60);
        let user_id = Uuid::new_v4();

        let issued = service.issue(user_id, Role::Admin).unwrap();
        assert_eq!(issued.expires_in, 3600);

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_foreign_signature() {
        let issued = TokenService::new("one-secret", 60).issue(Uuid::new_v4(), Role::User).unwrap();
        let err = TokenService::new("other-secret", 60).verify(&issued.token).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn rejects_expired_token() {
        let secret = "test-secret";
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::User,
            exp: now - 120,
            iat: now - 3720,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap();

        assert!(TokenService::new(secret, 60).verify(&token).is_err());
    }

    #[test]
    fn only_owner_or_admin_can_modify() {
        let owner = Uuid::new_v4();
        let stranger = AuthUser { id: Uuid::new_v4(), role: Role::User };
        let admin = AuthUser { id: Uuid::new_v4(), role: Role::Admin };

        assert!(AuthUser { id: owner, role: Role::User }.can_modify(owner));
        assert!(!stranger.can_modify(owner));
        assert!(admin.can_modify(owner));
    }

    #[test]
    fn rejects_garbage() {
        assert!(TokenService::new("test-secret", 60).verify("not.a.jwt").is_err());
    }
}
