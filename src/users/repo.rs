use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::error::RepoResult;
use crate::users::repo_types::{NewUser, User};

/// Reads named `*_active` skip soft-deleted rows; everything else sees all rows.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: &NewUser) -> RepoResult<User>;
    async fn list_active(&self) -> RepoResult<Vec<User>>;
    async fn find_active(&self, id: Uuid) -> RepoResult<Option<User>>;
    async fn find_many_active(&self, ids: &[Uuid]) -> RepoResult<Vec<User>>;
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Persists the mutable fields of an active user.
    async fn update(&self, user: &User) -> RepoResult<Option<User>>;
    async fn soft_delete(&self, id: Uuid) -> RepoResult<u64>;
    /// Clears the deletion stamp; affects the row whether or not it was deleted.
    async fn restore(&self, id: Uuid) -> RepoResult<u64>;
    async fn hard_delete(&self, id: Uuid) -> RepoResult<u64>;
}

#[async_trait]
impl UserRepo for PgStore {
    async fn insert(&self, user: &NewUser) -> RepoResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_active(&self) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE deleted_at IS NULL
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_active(&self, id: Uuid) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn find_many_active(&self, ids: &[Uuid]) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE id = ANY($1) AND deleted_at IS NULL
            "#,
        )
        .bind(ids)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn update(&self, user: &User) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET username = $2,
                   email = $3,
                   password_hash = $4,
                   updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, username, email, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn soft_delete(&self, id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn restore(&self, id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query("UPDATE users SET deleted_at = NULL WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn hard_delete(&self, id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
