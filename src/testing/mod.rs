//! In-memory implementation of the store traits.
//!
//! Mirrors the PostgreSQL repository's observable behavior (unique name/email,
//! FK checks on review insert, review cleanup on court and user delete,
//! aggregate rating truncated to one decimal) so services and the HTTP router
//! can be exercised without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::court::aggregate_rating;
use crate::database::models::{
    Court, CourtChanges, CredentialChanges, NewCourt, NewReview, NewUser, Review, ReviewChanges, UserRecord,
};
use crate::database::{CourtStore, DatabaseError, ReviewStore, Store, UserStore};

#[derive(Debug, Clone)]
struct CourtRow {
    id: i64,
    name: String,
    description: String,
    location: String,
    address: String,
    price: Option<Decimal>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ReviewRow {
    id: i64,
    court_id: i64,
    user_id: Uuid,
    rating: i32,
    comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, UserRecord>,
    courts: BTreeMap<i64, CourtRow>,
    reviews: BTreeMap<i64, ReviewRow>,
    next_court_id: i64,
    next_review_id: i64,
}

impl State {
    fn annotate(&self, row: &CourtRow) -> Court {
        let ratings: Vec<i32> = self
            .reviews
            .values()
            .filter(|r| r.court_id == row.id)
            .map(|r| r.rating)
            .collect();

        Court {
            id: row.id,
            name: row.name.clone(),
            description: row.description.clone(),
            location: row.location.clone(),
            address: row.address.clone(),
            price: row.price,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            rating: aggregate_rating(&ratings),
            num_reviews: ratings.len() as i64,
        }
    }

    fn with_author(&self, row: &ReviewRow) -> Review {
        let author = self
            .users
            .get(&row.user_id)
            .map(|u| u.name.clone())
            .unwrap_or_default();

        Review {
            id: row.id,
            court_id: row.court_id,
            user_id: row.user_id,
            author,
            rating: row.rating,
            comment: row.comment.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    /// Newest first, id breaking ties between equal timestamps
    fn reviews_where(&self, keep: impl Fn(&ReviewRow) -> bool) -> Vec<Review> {
        let mut rows: Vec<&ReviewRow> = self.reviews.values().filter(|r| keep(r)).collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.into_iter().map(|r| self.with_author(r)).collect()
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Thread-safe in-memory store; one lock makes every operation atomic
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of review rows referencing `court_id`, orphans included
    pub async fn review_rows_for_court(&self, court_id: i64) -> usize {
        let state = self.state.read().await;
        state.reviews.values().filter(|r| r.court_id == court_id).count()
    }

    /// Change a user's role directly, the way an operator would in SQL
    pub async fn set_role(&self, id: Uuid, role: crate::types::Role) -> bool {
        let mut state = self.state.write().await;
        match state.users.get_mut(&id) {
            Some(user) => {
                user.role = role.as_str().to_string();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, DatabaseError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_name_or_email(&self, name: &str, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.name == name || u.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, DatabaseError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.name == user.name) || state.email_taken(&user.email, None) {
            return Err(DatabaseError::Conflict("Username or email already registered".to_string()));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        state.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_user_credentials(
        &self,
        id: Uuid,
        changes: CredentialChanges,
    ) -> Result<Option<UserRecord>, DatabaseError> {
        let mut state = self.state.write().await;
        if let Some(email) = &changes.email {
            if state.email_taken(email, Some(id)) {
                return Err(DatabaseError::Conflict("Username or email already registered".to_string()));
            }
        }

        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, DatabaseError> {
        let state = self.state.read().await;
        let mut users: Vec<UserRecord> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut state = self.state.write().await;
        let owned: Vec<i64> = state
            .courts
            .values()
            .filter(|c| c.user_id == id)
            .map(|c| c.id)
            .collect();

        state
            .reviews
            .retain(|_, r| r.user_id != id && !owned.contains(&r.court_id));
        state.courts.retain(|_, c| c.user_id != id);
        Ok(state.users.remove(&id).is_some())
    }
}

#[async_trait]
impl CourtStore for MemoryStore {
    async fn list_courts(&self) -> Result<Vec<Court>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.courts.values().map(|c| state.annotate(c)).collect())
    }

    async fn list_courts_by_owner(&self, owner: Uuid) -> Result<Vec<Court>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state
            .courts
            .values()
            .filter(|c| c.user_id == owner)
            .map(|c| state.annotate(c))
            .collect())
    }

    async fn find_court(&self, id: i64) -> Result<Option<Court>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.courts.get(&id).map(|c| state.annotate(c)))
    }

    async fn insert_court(&self, owner: Uuid, court: NewCourt) -> Result<Court, DatabaseError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&owner) {
            return Err(DatabaseError::NotFound("Owner not found".to_string()));
        }

        state.next_court_id += 1;
        let now = Utc::now();
        let row = CourtRow {
            id: state.next_court_id,
            name: court.name,
            description: court.description,
            location: court.location,
            address: court.address,
            price: court.price,
            user_id: owner,
            created_at: now,
            updated_at: now,
        };
        let created = state.annotate(&row);
        state.courts.insert(row.id, row);
        Ok(created)
    }

    async fn update_court(&self, id: i64, changes: CourtChanges) -> Result<Option<Court>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(row) = state.courts.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            row.name = name;
        }
        if let Some(description) = changes.description {
            row.description = description;
        }
        if let Some(location) = changes.location {
            row.location = location;
        }
        if let Some(address) = changes.address {
            row.address = address;
        }
        if let Some(price) = changes.price {
            row.price = Some(price);
        }
        row.updated_at = Utc::now();

        let row = row.clone();
        Ok(Some(state.annotate(&row)))
    }

    async fn delete_court(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut state = self.state.write().await;
        state.reviews.retain(|_, r| r.court_id != id);
        Ok(state.courts.remove(&id).is_some())
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn list_reviews_for_court(&self, court_id: i64) -> Result<Vec<Review>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.reviews_where(|r| r.court_id == court_id))
    }

    async fn list_reviews_by_author(&self, user_id: Uuid) -> Result<Vec<Review>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.reviews_where(|r| r.user_id == user_id))
    }

    async fn find_review(&self, id: i64) -> Result<Option<Review>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.reviews.get(&id).map(|r| state.with_author(r)))
    }

    async fn insert_review(&self, court_id: i64, author: Uuid, review: NewReview) -> Result<Review, DatabaseError> {
        let mut state = self.state.write().await;
        if !state.courts.contains_key(&court_id) {
            return Err(DatabaseError::NotFound("Court not found".to_string()));
        }
        if !state.users.contains_key(&author) {
            return Err(DatabaseError::NotFound("User not found".to_string()));
        }

        state.next_review_id += 1;
        let now = Utc::now();
        let row = ReviewRow {
            id: state.next_review_id,
            court_id,
            user_id: author,
            rating: review.rating,
            comment: review.comment,
            created_at: now,
            updated_at: now,
        };
        let created = state.with_author(&row);
        state.reviews.insert(row.id, row);
        Ok(created)
    }

    async fn update_review(&self, id: i64, changes: ReviewChanges) -> Result<Option<Review>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(row) = state.reviews.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(rating) = changes.rating {
            row.rating = rating;
        }
        if let Some(comment) = changes.comment {
            row.comment = comment;
        }
        row.updated_at = Utc::now();

        let row = row.clone();
        Ok(Some(state.with_author(&row)))
    }

    async fn delete_review(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut state = self.state.write().await;
        Ok(state.reviews.remove(&id).is_some())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
