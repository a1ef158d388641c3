use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Court, CourtChanges, NewCourt};
use crate::database::repository::{classify_write_error, CourtStore, PgRepository};

/// Courts left-joined to their reviews; zero-review courts still appear with
/// rating 0. Callers append WHERE / GROUP BY / ORDER BY.
const SELECT_COURTS: &str = "
    SELECT c.id, c.name, c.description, c.location, c.address, c.price, c.user_id,
           c.created_at, c.updated_at,
           COALESCE(TRUNC(AVG(r.rating), 1), 0)::float8 AS rating,
           COUNT(r.id) AS num_reviews
    FROM courts c
    LEFT JOIN reviews r ON r.court_id = c.id";

#[async_trait]
impl CourtStore for PgRepository {
    async fn list_courts(&self) -> Result<Vec<Court>, DatabaseError> {
        let sql = format!("{} GROUP BY c.id ORDER BY c.id ASC", SELECT_COURTS);
        let courts = sqlx::query_as::<_, Court>(&sql).fetch_all(&self.pool).await?;
        Ok(courts)
    }

    async fn list_courts_by_owner(&self, owner: Uuid) -> Result<Vec<Court>, DatabaseError> {
        let sql = format!("{} WHERE c.user_id = $1 GROUP BY c.id ORDER BY c.id ASC", SELECT_COURTS);
        let courts = sqlx::query_as::<_, Court>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(courts)
    }

    async fn find_court(&self, id: i64) -> Result<Option<Court>, DatabaseError> {
        let sql = format!("{} WHERE c.id = $1 GROUP BY c.id", SELECT_COURTS);
        let court = sqlx::query_as::<_, Court>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(court)
    }

    async fn insert_court(&self, owner: Uuid, court: NewCourt) -> Result<Court, DatabaseError> {
        sqlx::query_as::<_, Court>(
            "INSERT INTO courts (name, description, location, address, price, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, name, description, location, address, price, user_id,
                       created_at, updated_at, 0::float8 AS rating, 0::int8 AS num_reviews",
        )
        .bind(&court.name)
        .bind(&court.description)
        .bind(&court.location)
        .bind(&court.address)
        .bind(court.price)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, "Court already exists", "Owner not found"))
    }

    async fn update_court(&self, id: i64, changes: CourtChanges) -> Result<Option<Court>, DatabaseError> {
        let court = sqlx::query_as::<_, Court>(
            "WITH c AS (
                 UPDATE courts
                 SET name = COALESCE($2, name),
                     description = COALESCE($3, description),
                     location = COALESCE($4, location),
                     address = COALESCE($5, address),
                     price = COALESCE($6, price),
                     updated_at = NOW()
                 WHERE id = $1
                 RETURNING *
             )
             SELECT c.id, c.name, c.description, c.location, c.address, c.price, c.user_id,
                    c.created_at, c.updated_at,
                    COALESCE(TRUNC(AVG(r.rating), 1), 0)::float8 AS rating,
                    COUNT(r.id) AS num_reviews
             FROM c
             LEFT JOIN reviews r ON r.court_id = c.id
             GROUP BY c.id, c.name, c.description, c.location, c.address, c.price, c.user_id,
                      c.created_at, c.updated_at",
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.location)
        .bind(changes.address)
        .bind(changes.price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(court)
    }

    async fn delete_court(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Review inserts take a key-share lock on the court row, so they
        // queue behind this one and then fail the FK check
        let locked = sqlx::query("SELECT id FROM courts WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        // reviews.court_id has no ON DELETE CASCADE
        sqlx::query("DELETE FROM reviews WHERE court_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM courts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }
}
