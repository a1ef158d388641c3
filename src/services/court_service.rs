use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::auth::AuthUser;
use crate::database::models::{Court, CourtChanges, CourtDetail, NewCourt};
use crate::database::Store;
use crate::error::ApiError;
use crate::services::{ensure_can_modify, validation};

/// Court payload for both create and partial update
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CourtRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

pub struct CourtService {
    store: Arc<dyn Store>,
}

impl CourtService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<Court>, ApiError> {
        Ok(self.store.list_courts().await?)
    }

    pub async fn list_by_owner(&self, owner: &AuthUser) -> Result<Vec<Court>, ApiError> {
        Ok(self.store.list_courts_by_owner(owner.id).await?)
    }

    /// The court together with its reviews
    pub async fn get_by_id(&self, id: i64) -> Result<CourtDetail, ApiError> {
        let court = self.find(id).await?;
        let reviews = self.store.list_reviews_for_court(id).await?;
        Ok(CourtDetail { court, reviews })
    }

    pub async fn create(&self, owner: &AuthUser, request: CourtRequest) -> Result<Court, ApiError> {
        let court = NewCourt {
            name: validation::require_text("name", request.name.as_deref())?,
            description: validation::require_text("description", request.description.as_deref())?,
            location: validation::require_text("location", request.location.as_deref())?,
            address: validation::require_text("address", request.address.as_deref())?,
            price: validation::validate_price(request.price)?,
        };

        let created = self.store.insert_court(owner.id, court).await?;
        info!("User {} created court {}", owner.id, created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, actor: &AuthUser, request: CourtRequest) -> Result<Court, ApiError> {
        let existing = self.find(id).await?;
        ensure_can_modify(actor, existing.user_id, "court", id)?;

        let changes = CourtChanges {
            name: validation::optional_text("name", request.name.as_deref())?,
            description: validation::optional_text("description", request.description.as_deref())?,
            location: validation::optional_text("location", request.location.as_deref())?,
            address: validation::optional_text("address", request.address.as_deref())?,
            price: validation::validate_price(request.price)?,
        };
        if changes.is_empty() {
            return Err(ApiError::validation_error("No fields to update", None));
        }

        let updated = self
            .store
            .update_court(id, changes)
            .await?
            .ok_or_else(|| court_not_found(id))?;

        info!("User {} updated court {}", actor.id, id);
        Ok(updated)
    }

    /// Removes the court and every review written about it
    pub async fn delete(&self, id: i64, actor: &AuthUser) -> Result<(), ApiError> {
        let existing = self.find(id).await?;
        ensure_can_modify(actor, existing.user_id, "court", id)?;

        if !self.store.delete_court(id).await? {
            return Err(court_not_found(id));
        }

        info!("User {} deleted court {} and its reviews", actor.id, id);
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Court, ApiError> {
        self.store.find_court(id).await?.ok_or_else(|| court_not_found(id))
    }
}

fn court_not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Court {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewReview, NewUser};
    use crate::database::{ReviewStore, UserStore};
    use crate::testing::MemoryStore;
    use crate::types::Role;
    use axum::http::StatusCode;
    use uuid::Uuid;

    async fn member(store: &MemoryStore, name: &str, role: Role) -> AuthUser {
        let record = store
            .insert_user(NewUser {
                name: name.to_string(),
                email: format!("{}@x.com", name),
                password_hash: "unused".to_string(),
                role,
            })
            .await
            .unwrap();
        AuthUser { id: record.id, role }
    }

    fn court1() -> CourtRequest {
        CourtRequest {
            name: Some("Court1".to_string()),
            description: Some("Clay".to_string()),
            location: Some("Lima".to_string()),
            address: Some("Av 1".to_string()),
            price: Some(Decimal::new(50, 0)),
        }
    }

    #[tokio::test]
    async fn create_assigns_caller_as_owner() {
        let store = Arc::new(MemoryStore::new());
        let alice = member(&store, "alice1", Role::User).await;
        let courts = CourtService::new(store.clone());

        let court = courts.create(&alice, court1()).await.unwrap();
        assert_eq!(court.user_id, alice.id);
        assert_eq!(court.rating, 0.0);
        assert_eq!(court.num_reviews, 0);

        let listed = courts.list_by_owner(&alice).await.unwrap();
        assert_eq!(listed, vec![court]);
    }

    #[tokio::test]
    async fn create_requires_text_fields() {
        let store = Arc::new(MemoryStore::new());
        let alice = member(&store, "alice1", Role::User).await;
        let courts = CourtService::new(store);

        let err = courts
            .create(&alice, CourtRequest { address: Some("  ".to_string()), ..court1() })
            .await
            .unwrap_err();
        assert_eq!(err.to_json()["field_errors"]["address"], "is required");

        let err = courts
            .create(&alice, CourtRequest { price: Some(Decimal::new(-5, 0)), ..court1() })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn price_is_optional() {
        let store = Arc::new(MemoryStore::new());
        let alice = member(&store, "alice1", Role::User).await;
        let court = CourtService::new(store)
            .create(&alice, CourtRequest { price: None, ..court1() })
            .await
            .unwrap();
        assert_eq!(court.price, None);
    }

    #[tokio::test]
    async fn update_is_partial_and_owner_only() {
        let store = Arc::new(MemoryStore::new());
        let alice = member(&store, "alice1", Role::User).await;
        let bob = member(&store, "bob_2", Role::User).await;
        let courts = CourtService::new(store);
        let court = courts.create(&alice, court1()).await.unwrap();

        let err = courts
            .update(court.id, &bob, CourtRequest { name: Some("Mine".to_string()), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let updated = courts
            .update(court.id, &alice, CourtRequest { name: Some("Court1b".to_string()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(updated.name, "Court1b");
        assert_eq!(updated.description, "Clay");
        assert_eq!(updated.price, Some(Decimal::new(50, 0)));

        let err = courts.update(court.id, &alice, CourtRequest::default()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn admin_may_modify_any_court() {
        let store = Arc::new(MemoryStore::new());
        let alice = member(&store, "alice1", Role::User).await;
        let admin = member(&store, "admin1", Role::Admin).await;
        let courts = CourtService::new(store);
        let court = courts.create(&alice, court1()).await.unwrap();

        courts
            .update(court.id, &admin, CourtRequest { location: Some("Cusco".to_string()), ..Default::default() })
            .await
            .unwrap();
        courts.delete(court.id, &admin).await.unwrap();
        assert!(courts.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_reviews() {
        let store = Arc::new(MemoryStore::new());
        let alice = member(&store, "alice1", Role::User).await;
        let courts = CourtService::new(store.clone());
        let court = courts.create(&alice, court1()).await.unwrap();
        store
            .insert_review(court.id, alice.id, NewReview { rating: 4, comment: "ok".to_string() })
            .await
            .unwrap();

        courts.delete(court.id, &alice).await.unwrap();
        assert_eq!(store.review_rows_for_court(court.id).await, 0);

        let err = courts.get_by_id(court.id).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_court_is_not_found_before_permission_check() {
        let store = Arc::new(MemoryStore::new());
        let stranger = AuthUser { id: Uuid::new_v4(), role: Role::User };
        let courts = CourtService::new(store);

        let err = courts.delete(999, &stranger).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Court 999 not found");
    }

    #[tokio::test]
    async fn detail_includes_reviews() {
        let store = Arc::new(MemoryStore::new());
        let alice = member(&store, "alice1", Role::User).await;
        let courts = CourtService::new(store.clone());
        let court = courts.create(&alice, court1()).await.unwrap();
        store
            .insert_review(court.id, alice.id, NewReview { rating: 5, comment: "great".to_string() })
            .await
            .unwrap();

        let detail = courts.get_by_id(court.id).await.unwrap();
        assert_eq!(detail.court.rating, 5.0);
        assert_eq!(detail.reviews.len(), 1);
        assert_eq!(detail.reviews[0].author, "alice1");
    }
}
