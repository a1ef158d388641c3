use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{CredentialChanges, NewUser, UserRecord};
use crate::database::repository::{classify_write_error, PgRepository, UserStore};

const DUPLICATE_USER: &str = "Username or email already registered";

#[async_trait]
impl UserStore for PgRepository {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, DatabaseError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash, role, created_at, updated_at
             FROM users
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash, role, created_at, updated_at
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_name_or_email(&self, name: &str, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash, role, created_at, updated_at
             FROM users
             WHERE name = $1 OR email = $2
             LIMIT 1",
        )
        .bind(name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, DatabaseError> {
        sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (id, name, email, password_hash, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, email, password_hash, role, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, DUPLICATE_USER, "User not found"))
    }

    async fn update_user_credentials(
        &self,
        id: Uuid,
        changes: CredentialChanges,
    ) -> Result<Option<UserRecord>, DatabaseError> {
        sqlx::query_as::<_, UserRecord>(
            "UPDATE users
             SET email = COALESCE($2, email),
                 password_hash = COALESCE($3, password_hash),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING id, name, email, password_hash, role, created_at, updated_at",
        )
        .bind(id)
        .bind(changes.email)
        .bind(changes.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, DUPLICATE_USER, "User not found"))
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, DatabaseError> {
        let users = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash, role, created_at, updated_at
             FROM users
             ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }
        sqlx::query("SELECT id FROM courts WHERE user_id = $1 FOR UPDATE")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM reviews
             WHERE user_id = $1
                OR court_id IN (SELECT id FROM courts WHERE user_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM courts WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }
}
