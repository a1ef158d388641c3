use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::auth::AuthUser;
use crate::database::models::{NewReview, Review, ReviewChanges};
use crate::database::Store;
use crate::error::ApiError;
use crate::services::{ensure_can_modify, validation};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub struct ReviewService {
    store: Arc<dyn Store>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Newest first; the court must exist
    pub async fn list_for_court(&self, court_id: i64) -> Result<Vec<Review>, ApiError> {
        if self.store.find_court(court_id).await?.is_none() {
            return Err(ApiError::not_found(format!("Court {} not found", court_id)));
        }
        Ok(self.store.list_reviews_for_court(court_id).await?)
    }

    pub async fn list_by_author(&self, author: &AuthUser) -> Result<Vec<Review>, ApiError> {
        Ok(self.store.list_reviews_by_author(author.id).await?)
    }

    pub async fn create(&self, court_id: i64, author: &AuthUser, request: ReviewRequest) -> Result<Review, ApiError> {
        let review = NewReview {
            rating: validation::validate_rating(request.rating)?,
            comment: validation::require_text("comment", request.comment.as_deref())?,
        };

        // The store also enforces the court reference, this just gives a clearer message
        if self.store.find_court(court_id).await?.is_none() {
            return Err(ApiError::not_found(format!("Court {} not found", court_id)));
        }

        let created = self.store.insert_review(court_id, author.id, review).await?;
        info!("User {} reviewed court {} (review {})", author.id, court_id, created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, actor: &AuthUser, request: ReviewRequest) -> Result<Review, ApiError> {
        let existing = self.find(id).await?;
        ensure_can_modify(actor, existing.user_id, "review", id)?;

        let changes = ReviewChanges {
            rating: match request.rating {
                Some(r) => Some(validation::validate_rating(Some(r))?),
                None => None,
            },
            comment: validation::optional_text("comment", request.comment.as_deref())?,
        };
        if changes.rating.is_none() && changes.comment.is_none() {
            return Err(ApiError::validation_error("No fields to update", None));
        }

        let updated = self
            .store
            .update_review(id, changes)
            .await?
            .ok_or_else(|| review_not_found(id))?;

        info!("User {} updated review {}", actor.id, id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64, actor: &AuthUser) -> Result<(), ApiError> {
        let existing = self.find(id).await?;
        ensure_can_modify(actor, existing.user_id, "review", id)?;

        if !self.store.delete_review(id).await? {
            return Err(review_not_found(id));
        }

        info!("User {} deleted review {}", actor.id, id);
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Review, ApiError> {
        self.store.find_review(id).await?.ok_or_else(|| review_not_found(id))
    }
}

fn review_not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Review {} not found", id))
}
