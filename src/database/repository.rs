use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    Court, CourtChanges, CredentialChanges, NewCourt, NewReview, NewUser, Review, ReviewChanges, UserRecord,
};

/// Credential store: persistence of user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError>;

    /// Single lookup covering both unique columns
    async fn find_user_by_name_or_email(&self, name: &str, email: &str) -> Result<Option<UserRecord>, DatabaseError>;

    /// Fails with `Conflict` when name or email is already taken
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, DatabaseError>;

    async fn update_user_credentials(
        &self,
        id: Uuid,
        changes: CredentialChanges,
    ) -> Result<Option<UserRecord>, DatabaseError>;

    async fn list_users(&self) -> Result<Vec<UserRecord>, DatabaseError>;

    /// Removes the user together with their reviews, their courts and every
    /// review on those courts, atomically. Returns false if no such user.
    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

/// Court records annotated with `rating` / `num_reviews` computed from live reviews
#[async_trait]
pub trait CourtStore: Send + Sync {
    /// Ordered by id ascending
    async fn list_courts(&self) -> Result<Vec<Court>, DatabaseError>;

    async fn list_courts_by_owner(&self, owner: Uuid) -> Result<Vec<Court>, DatabaseError>;

    async fn find_court(&self, id: i64) -> Result<Option<Court>, DatabaseError>;

    async fn insert_court(&self, owner: Uuid, court: NewCourt) -> Result<Court, DatabaseError>;

    /// Overwrites the supplied fields and bumps `updated_at`
    async fn update_court(&self, id: i64, changes: CourtChanges) -> Result<Option<Court>, DatabaseError>;

    /// Deletes the court's reviews and then the court in one transaction.
    /// Returns false if the court did not exist.
    async fn delete_court(&self, id: i64) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Newest first
    async fn list_reviews_for_court(&self, court_id: i64) -> Result<Vec<Review>, DatabaseError>;

    async fn list_reviews_by_author(&self, user_id: Uuid) -> Result<Vec<Review>, DatabaseError>;

    async fn find_review(&self, id: i64) -> Result<Option<Review>, DatabaseError>;

    /// Fails with `NotFound` if the court does not exist
    async fn insert_review(&self, court_id: i64, author: Uuid, review: NewReview) -> Result<Review, DatabaseError>;

    async fn update_review(&self, id: i64, changes: ReviewChanges) -> Result<Option<Review>, DatabaseError>;

    async fn delete_review(&self, id: i64) -> Result<bool, DatabaseError>;
}

/// Everything the services need from persistence
#[async_trait]
pub trait Store: UserStore + CourtStore + ReviewStore {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// PostgreSQL-backed store over the shared connection pool
#[derive(Clone)]
pub struct PgRepository {
    pub(crate) pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgRepository {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

/// Classify constraint violations raised by writes
pub(crate) fn classify_write_error(err: sqlx::Error, conflict: &str, missing: &str) -> DatabaseError {
    let code = err
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        // unique_violation
        Some("23505") => DatabaseError::Conflict(conflict.to_string()),
        // foreign_key_violation
        Some("23503") => DatabaseError::NotFound(missing.to_string()),
        _ => DatabaseError::Sqlx(err),
    }
}
