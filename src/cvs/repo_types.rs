use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::skills::repo_types::Skill;

/// CV record in the database.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Cv {
    pub id: Uuid,
    pub user_id: Uuid, // owner, required
    pub name: String,
    pub firstname: String,
    pub age: i32,
    pub cin: i64, // unique
    pub job: String,
    pub path: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewCv {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub firstname: String,
    pub age: i32,
    pub cin: i64,
    pub job: String,
    pub path: String,
}

/// One `cv_skills` join row with the skill it points at.
#[derive(Debug, Clone, FromRow)]
pub struct CvSkillRow {
    pub cv_id: Uuid,
    #[sqlx(flatten)]
    pub skill: Skill,
}
