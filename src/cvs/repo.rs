use async_trait::async_trait;
use uuid::Uuid;

use crate::cvs::repo_types::{Cv, CvSkillRow, NewCv};
use crate::db::PgStore;
use crate::error::RepoResult;

#[async_trait]
pub trait CvRepo: Send + Sync {
    async fn insert(&self, cv: &NewCv) -> RepoResult<Cv>;
    async fn list(&self) -> RepoResult<Vec<Cv>>;
    async fn find(&self, id: Uuid) -> RepoResult<Option<Cv>>;
    async fn list_by_users(&self, user_ids: &[Uuid]) -> RepoResult<Vec<Cv>>;
    async fn find_by_cin(&self, cin: i64) -> RepoResult<Option<Cv>>;
    async fn update(&self, cv: &Cv) -> RepoResult<Option<Cv>>;
    async fn delete(&self, id: Uuid) -> RepoResult<u64>;

    // ---- cv_skills join rows ----

    async fn skills_of(&self, cv_ids: &[Uuid]) -> RepoResult<Vec<CvSkillRow>>;
    /// Links every skill; pairs that already exist are left untouched.
    async fn attach_skills(&self, cv_id: Uuid, skill_ids: &[Uuid]) -> RepoResult<u64>;
    async fn detach_skill(&self, cv_id: Uuid, skill_id: Uuid) -> RepoResult<u64>;
}

#[async_trait]
impl CvRepo for PgStore {
    async fn insert(&self, cv: &NewCv) -> RepoResult<Cv> {
        let row = sqlx::query_as::<_, Cv>(
            r#"
            INSERT INTO cvs (id, user_id, name, firstname, age, cin, job, path)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, name, firstname, age, cin, job, path,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(cv.id)
        .bind(cv.user_id)
        .bind(&cv.name)
        .bind(&cv.firstname)
        .bind(cv.age)
        .bind(cv.cin)
        .bind(&cv.job)
        .bind(&cv.path)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list(&self) -> RepoResult<Vec<Cv>> {
        let rows = sqlx::query_as::<_, Cv>(
            r#"
            SELECT id, user_id, name, firstname, age, cin, job, path,
                   created_at, updated_at, deleted_at
            FROM cvs
            WHERE deleted_at IS NULL
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<Cv>> {
        let row = sqlx::query_as::<_, Cv>(
            r#"
            SELECT id, user_id, name, firstname, age, cin, job, path,
                   created_at, updated_at, deleted_at
            FROM cvs
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_by_users(&self, user_ids: &[Uuid]) -> RepoResult<Vec<Cv>> {
        let rows = sqlx::query_as::<_, Cv>(
            r#"
            SELECT id, user_id, name, firstname, age, cin, job, path,
                   created_at, updated_at, deleted_at
            FROM cvs
            WHERE user_id = ANY($1) AND deleted_at IS NULL
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_cin(&self, cin: i64) -> RepoResult<Option<Cv>> {
        let row = sqlx::query_as::<_, Cv>(
            r#"
            SELECT id, user_id, name, firstname, age, cin, job, path,
                   created_at, updated_at, deleted_at
            FROM cvs
            WHERE cin = $1
            "#,
        )
        .bind(cin)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn update(&self, cv: &Cv) -> RepoResult<Option<Cv>> {
        let row = sqlx::query_as::<_, Cv>(
            r#"
            UPDATE cvs
               SET name = $2,
                   firstname = $3,
                   age = $4,
                   cin = $5,
                   job = $6,
                   path = $7,
                   updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, user_id, name, firstname, age, cin, job, path,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(cv.id)
        .bind(&cv.name)
        .bind(&cv.firstname)
        .bind(cv.age)
        .bind(cv.cin)
        .bind(&cv.job)
        .bind(&cv.path)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM cvs WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn skills_of(&self, cv_ids: &[Uuid]) -> RepoResult<Vec<CvSkillRow>> {
        let rows = sqlx::query_as::<_, CvSkillRow>(
            r#"
            SELECT cs.cv_id, s.id, s.designation, s.created_at, s.updated_at, s.deleted_at
              FROM cv_skills cs
              JOIN skills s ON s.id = cs.skill_id
             WHERE cs.cv_id = ANY($1)
               AND s.deleted_at IS NULL
             ORDER BY s.designation ASC
            "#,
        )
        .bind(cv_ids)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn attach_skills(&self, cv_id: Uuid, skill_ids: &[Uuid]) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO cv_skills (cv_id, skill_id)
            SELECT $1, UNNEST($2::uuid[])
            ON CONFLICT (cv_id, skill_id) DO NOTHING
            "#,
        )
        .bind(cv_id)
        .bind(skill_ids)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn detach_skill(&self, cv_id: Uuid, skill_id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM cv_skills WHERE cv_id = $1 AND skill_id = $2")
            .bind(cv_id)
            .bind(skill_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
