use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewReview, Review, ReviewChanges};
use crate::database::repository::{classify_write_error, PgRepository, ReviewStore};

const SELECT_REVIEWS: &str = "
    SELECT r.id, r.court_id, r.user_id, u.name AS author, r.rating, r.comment,
           r.created_at, r.updated_at
    FROM reviews r
    JOIN users u ON u.id = r.user_id";

#[async_trait]
impl ReviewStore for PgRepository {
    async fn list_reviews_for_court(&self, court_id: i64) -> Result<Vec<Review>, DatabaseError> {
        let sql = format!("{} WHERE r.court_id = $1 ORDER BY r.created_at DESC, r.id DESC", SELECT_REVIEWS);
        let reviews = sqlx::query_as::<_, Review>(&sql)
            .bind(court_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }

    async fn list_reviews_by_author(&self, user_id: Uuid) -> Result<Vec<Review>, DatabaseError> {
        let sql = format!("{} WHERE r.user_id = $1 ORDER BY r.created_at DESC, r.id DESC", SELECT_REVIEWS);
        let reviews = sqlx::query_as::<_, Review>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }

    async fn find_review(&self, id: i64) -> Result<Option<Review>, DatabaseError> {
        let sql = format!("{} WHERE r.id = $1", SELECT_REVIEWS);
        let review = sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(review)
    }

    async fn insert_review(&self, court_id: i64, author: Uuid, review: NewReview) -> Result<Review, DatabaseError> {
        sqlx::query_as::<_, Review>(
            "WITH r AS (
                 INSERT INTO reviews (court_id, user_id, rating, comment)
                 VALUES ($1, $2, $3, $4)
                 RETURNING *
             )
             SELECT r.id, r.court_id, r.user_id, u.name AS author, r.rating, r.comment,
                    r.created_at, r.updated_at
             FROM r
             JOIN users u ON u.id = r.user_id",
        )
        .bind(court_id)
        .bind(author)
        .bind(review.rating)
        .bind(&review.comment)
        .fetch_one(&self.pool)
        .await
        // A court deleted between the existence check and the insert trips the FK
        .map_err(|e| classify_write_error(e, "Review already exists", "Court not found"))
    }

    async fn update_review(&self, id: i64, changes: ReviewChanges) -> Result<Option<Review>, DatabaseError> {
        let review = sqlx::query_as::<_, Review>(
            "WITH r AS (
                 UPDATE reviews
                 SET rating = COALESCE($2, rating),
                     comment = COALESCE($3, comment),
                     updated_at = NOW()
                 WHERE id = $1
                 RETURNING *
             )
             SELECT r.id, r.court_id, r.user_id, u.name AS author, r.rating, r.comment,
                    r.created_at, r.updated_at
             FROM r
             JOIN users u ON u.id = r.user_id",
        )
        .bind(id)
        .bind(changes.rating)
        .bind(changes.comment)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn delete_review(&self, id: i64) -> Result<bool, DatabaseError> {
        let deleted = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}
