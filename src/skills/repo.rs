use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::error::RepoResult;
use crate::skills::repo_types::Skill;

#[async_trait]
pub trait SkillRepo: Send + Sync {
    async fn insert(&self, id: Uuid, designation: &str) -> RepoResult<Skill>;
    async fn list(&self) -> RepoResult<Vec<Skill>>;
    async fn find(&self, id: Uuid) -> RepoResult<Option<Skill>>;
    async fn find_by_designation(&self, designation: &str) -> RepoResult<Option<Skill>>;
    /// Resolves every id that exists; missing ids are silently absent from the result.
    async fn find_many(&self, ids: &[Uuid]) -> RepoResult<Vec<Skill>>;
    /// Persists the mutable fields, returning `None` when the row is gone.
    async fn update(&self, skill: &Skill) -> RepoResult<Option<Skill>>;
    async fn delete(&self, id: Uuid) -> RepoResult<u64>;
}

#[async_trait]
impl SkillRepo for PgStore {
    async fn insert(&self, id: Uuid, designation: &str) -> RepoResult<Skill> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (id, designation)
            VALUES ($1, $2)
            RETURNING id, designation, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(designation)
        .fetch_one(&self.db)
        .await?;
        Ok(skill)
    }

    async fn list(&self) -> RepoResult<Vec<Skill>> {
        let rows = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, designation, created_at, updated_at, deleted_at
            FROM skills
            WHERE deleted_at IS NULL
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<Skill>> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, designation, created_at, updated_at, deleted_at
            FROM skills
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(skill)
    }

    async fn find_by_designation(&self, designation: &str) -> RepoResult<Option<Skill>> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, designation, created_at, updated_at, deleted_at
            FROM skills
            WHERE designation = $1
            "#,
        )
        .bind(designation)
        .fetch_optional(&self.db)
        .await?;
        Ok(skill)
    }

    async fn find_many(&self, ids: &[Uuid]) -> RepoResult<Vec<Skill>> {
        let rows = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, designation, created_at, updated_at, deleted_at
            FROM skills
            WHERE id = ANY($1) AND deleted_at IS NULL
            "#,
        )
        .bind(ids)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update(&self, skill: &Skill) -> RepoResult<Option<Skill>> {
        let updated = sqlx::query_as::<_, Skill>(
            r#"
            UPDATE skills
               SET designation = $2,
                   updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, designation, created_at, updated_at, deleted_at
            "#,
        )
        .bind(skill.id)
        .bind(&skill.designation)
        .fetch_optional(&self.db)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
