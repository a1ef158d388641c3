use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::password::PasswordError;
use crate::auth::{AuthUser, PasswordHasher};
use crate::database::models::{CredentialChanges, User, UserRecord};
use crate::database::Store;
use crate::error::ApiError;
use crate::services::validation;

/// Owner-initiated credential change. The current password is always required.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

pub struct UserService {
    store: Arc<dyn Store>,
    passwords: PasswordHasher,
    require_strong_passwords: bool,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, passwords: PasswordHasher, require_strong_passwords: bool) -> Self {
        Self {
            store,
            passwords,
            require_strong_passwords,
        }
    }

    pub async fn me(&self, actor: &AuthUser) -> Result<User, ApiError> {
        Ok(self.find(actor).await?.public())
    }

    pub async fn update_credentials(&self, actor: &AuthUser, request: UpdateProfileRequest) -> Result<User, ApiError> {
        if request.email.is_none() && request.new_password.is_none() {
            return Err(ApiError::validation_error("No fields to update", None));
        }
        let current = match request.current_password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(ApiError::invalid_field("current_password", "is required")),
        };

        let record = self.find(actor).await?;
        // An unreadable stored hash fails the same way a wrong password does
        let verified = match self.passwords.verify(current, record.password_hash.clone()).await {
            Ok(matches) => matches,
            Err(PasswordError::InvalidHash) => false,
            Err(other) => return Err(other.into()),
        };
        if !verified {
            warn!("User {} supplied a wrong current password", actor.id);
            return Err(ApiError::unauthorized("Invalid credentials"));
        }

        let email = match request.email.as_deref() {
            Some(e) => Some(validation::normalize_email(e)?),
            None => None,
        };
        let password_hash = match request.new_password {
            Some(p) => {
                validation::validate_password("new_password", &p, self.require_strong_passwords)?;
                Some(self.passwords.hash(p).await?)
            }
            None => None,
        };

        let updated = self
            .store
            .update_user_credentials(actor.id, CredentialChanges { email, password_hash })
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        info!("User {} updated their credentials", actor.id);
        Ok(updated.public())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let users = self.store.list_users().await?;
        Ok(users.iter().map(UserRecord::public).collect())
    }

    /// Removes the account along with its courts and reviews
    pub async fn delete_user(&self, actor: &AuthUser, id: uuid::Uuid) -> Result<(), ApiError> {
        if actor.id == id {
            return Err(ApiError::validation_error("Administrators cannot delete their own account", None));
        }
        if !self.store.delete_user(id).await? {
            return Err(ApiError::not_found("User not found"));
        }
        info!("User {} deleted user {}", actor.id, id);
        Ok(())
    }

    async fn find(&self, actor: &AuthUser) -> Result<UserRecord, ApiError> {
        self.store
            .find_user_by_id(actor.id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewCourt, NewReview, NewUser};
    use crate::database::{CourtStore, ReviewStore, UserStore};
    use crate::testing::MemoryStore;
    use crate::types::Role;
    use axum::http::StatusCode;

    async fn setup() -> (Arc<MemoryStore>, UserService, AuthUser) {
        let store = Arc::new(MemoryStore::new());
        let hasher = PasswordHasher::new(1024, 1).unwrap();
        let record = store
            .insert_user(NewUser {
                name: "alice1".to_string(),
                email: "a@x.com".to_string(),
                password_hash: hasher.hash_blocking("Passw0rd!").unwrap(),
                role: Role::User,
            })
            .await
            .unwrap();
        let users = UserService::new(store.clone(), hasher, true);
        (store, users, AuthUser { id: record.id, role: Role::User })
    }

    fn change(current: &str) -> UpdateProfileRequest {
        UpdateProfileRequest {
            current_password: Some(current.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn me_returns_public_view() {
        let (_, users, alice) = setup().await;
        let me = users.me(&alice).await.unwrap();
        assert_eq!(me.name, "alice1");
        assert_eq!(me.role, Role::User);
    }

    #[tokio::test]
    async fn credential_change_requires_current_password() {
        let (_, users, alice) = setup().await;

        let err = users
            .update_credentials(&alice, UpdateProfileRequest { email: Some("n@x.com".to_string()), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err.to_json()["field_errors"]["current_password"], "is required");

        let err = users
            .update_credentials(&alice, UpdateProfileRequest { email: Some("n@x.com".to_string()), ..change("Wr0ngpass") })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn changes_email_and_password() {
        let (store, users, alice) = setup().await;
        let updated = users
            .update_credentials(
                &alice,
                UpdateProfileRequest {
                    email: Some(" New@X.com".to_string()),
                    new_password: Some("N3wPassword".to_string()),
                    ..change("Passw0rd!")
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.email, "new@x.com");

        let stored = store.find_user_by_id(alice.id).await.unwrap().unwrap();
        let hasher = PasswordHasher::new(1024, 1).unwrap();
        assert!(hasher.verify_blocking("N3wPassword", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn email_taken_by_another_user_conflicts() {
        let (store, users, alice) = setup().await;
        store
            .insert_user(NewUser {
                name: "bob_2".to_string(),
                email: "b@x.com".to_string(),
                password_hash: "unused".to_string(),
                role: Role::User,
            })
            .await
            .unwrap();

        let err = users
            .update_credentials(&alice, UpdateProfileRequest { email: Some("b@x.com".to_string()), ..change("Passw0rd!") })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn nothing_to_change_is_rejected() {
        let (_, users, alice) = setup().await;
        let err = users.update_credentials(&alice, change("Passw0rd!")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn admin_delete_cascades_and_refuses_self() {
        let (store, users, alice) = setup().await;
        let admin = AuthUser { id: uuid::Uuid::new_v4(), role: Role::Admin };
        let court = store
            .insert_court(
                alice.id,
                NewCourt {
                    name: "Court1".to_string(),
                    description: "Clay".to_string(),
                    location: "Lima".to_string(),
                    address: "Av 1".to_string(),
                    price: None,
                },
            )
            .await
            .unwrap();
        store
            .insert_review(court.id, alice.id, NewReview { rating: 4, comment: "ok".to_string() })
            .await
            .unwrap();

        let err = users.delete_user(&alice, alice.id).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        users.delete_user(&admin, alice.id).await.unwrap();
        assert!(users.list_users().await.unwrap().is_empty());
        assert!(store.list_courts().await.unwrap().is_empty());
        assert_eq!(store.review_rows_for_court(court.id).await, 0);

        let err = users.delete_user(&admin, alice.id).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
