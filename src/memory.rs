//! In-memory store used by tests in place of Postgres. Mirrors the schema's
//! unique constraints and cascades so services see the same failures.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::cvs::repo::CvRepo;
use crate::cvs::repo_types::{Cv, CvSkillRow, NewCv};
use crate::error::{RepoError, RepoResult};
use crate::skills::repo::SkillRepo;
use crate::skills::repo_types::Skill;
use crate::users::repo::UserRepo;
use crate::users::repo_types::{NewUser, User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    skills: Vec<Skill>,
    cvs: Vec<Cv>,
    cv_skills: Vec<(Uuid, Uuid)>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }
}

fn unique(constraint: &str) -> RepoError {
    RepoError::UniqueViolation(constraint.to_string())
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn insert(&self, user: &NewUser) -> RepoResult<User> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(unique("users_email_key"));
        }
        let now = OffsetDateTime::now_utc();
        let row = User {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        t.users.push(row.clone());
        Ok(row)
    }

    async fn list_active(&self) -> RepoResult<Vec<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn find_active(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_many_active(&self, ids: &[Uuid]) -> RepoResult<Vec<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .filter(|u| ids.contains(&u.id) && u.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: &User) -> RepoResult<Option<User>> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(unique("users_email_key"));
        }
        let Some(row) = t
            .users
            .iter_mut()
            .find(|u| u.id == user.id && u.deleted_at.is_none())
        else {
            return Ok(None);
        };
        row.username = user.username.clone();
        row.email = user.email.clone();
        row.password_hash = user.password_hash.clone();
        row.updated_at = OffsetDateTime::now_utc();
        Ok(Some(row.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> RepoResult<u64> {
        let mut t = self.tables();
        match t
            .users
            .iter_mut()
            .find(|u| u.id == id && u.deleted_at.is_none())
        {
            Some(row) => {
                row.deleted_at = Some(OffsetDateTime::now_utc());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn restore(&self, id: Uuid) -> RepoResult<u64> {
        let mut t = self.tables();
        match t.users.iter_mut().find(|u| u.id == id) {
            Some(row) => {
                row.deleted_at = None;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn hard_delete(&self, id: Uuid) -> RepoResult<u64> {
        let mut t = self.tables();
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        let affected = (before - t.users.len()) as u64;
        if affected > 0 {
            let owned: Vec<Uuid> = t
                .cvs
                .iter()
                .filter(|cv| cv.user_id == id)
                .map(|cv| cv.id)
                .collect();
            t.cvs.retain(|cv| cv.user_id != id);
            t.cv_skills.retain(|(cv_id, _)| !owned.contains(cv_id));
        }
        Ok(affected)
    }
}

#[async_trait]
impl SkillRepo for MemoryStore {
    async fn insert(&self, id: Uuid, designation: &str) -> RepoResult<Skill> {
        let mut t = self.tables();
        if t.skills.iter().any(|s| s.designation == designation) {
            return Err(unique("skills_designation_key"));
        }
        let now = OffsetDateTime::now_utc();
        let row = Skill {
            id,
            designation: designation.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        t.skills.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> RepoResult<Vec<Skill>> {
        Ok(self.tables().skills.clone())
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<Skill>> {
        Ok(self.tables().skills.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_designation(&self, designation: &str) -> RepoResult<Option<Skill>> {
        Ok(self
            .tables()
            .skills
            .iter()
            .find(|s| s.designation == designation)
            .cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> RepoResult<Vec<Skill>> {
        Ok(self
            .tables()
            .skills
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn update(&self, skill: &Skill) -> RepoResult<Option<Skill>> {
        let mut t = self.tables();
        if t
            .skills
            .iter()
            .any(|s| s.designation == skill.designation && s.id != skill.id)
        {
            return Err(unique("skills_designation_key"));
        }
        let Some(row) = t.skills.iter_mut().find(|s| s.id == skill.id) else {
            return Ok(None);
        };
        row.designation = skill.designation.clone();
        row.updated_at = OffsetDateTime::now_utc();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<u64> {
        let mut t = self.tables();
        let before = t.skills.len();
        t.skills.retain(|s| s.id != id);
        t.cv_skills.retain(|(_, skill_id)| *skill_id != id);
        Ok((before - t.skills.len()) as u64)
    }
}

#[async_trait]
impl CvRepo for MemoryStore {
    async fn insert(&self, cv: &NewCv) -> RepoResult<Cv> {
        let mut t = self.tables();
        if t.cvs.iter().any(|c| c.cin == cv.cin) {
            return Err(unique("cvs_cin_key"));
        }
        let now = OffsetDateTime::now_utc();
        let row = Cv {
            id: cv.id,
            user_id: cv.user_id,
            name: cv.name.clone(),
            firstname: cv.firstname.clone(),
            age: cv.age,
            cin: cv.cin,
            job: cv.job.clone(),
            path: cv.path.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        t.cvs.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> RepoResult<Vec<Cv>> {
        Ok(self.tables().cvs.clone())
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<Cv>> {
        Ok(self.tables().cvs.iter().find(|c| c.id == id).cloned())
    }

    async fn list_by_users(&self, user_ids: &[Uuid]) -> RepoResult<Vec<Cv>> {
        Ok(self
            .tables()
            .cvs
            .iter()
            .filter(|c| user_ids.contains(&c.user_id))
            .cloned()
            .collect())
    }

    async fn find_by_cin(&self, cin: i64) -> RepoResult<Option<Cv>> {
        Ok(self.tables().cvs.iter().find(|c| c.cin == cin).cloned())
    }

    async fn update(&self, cv: &Cv) -> RepoResult<Option<Cv>> {
        let mut t = self.tables();
        if t.cvs.iter().any(|c| c.cin == cv.cin && c.id != cv.id) {
            return Err(unique("cvs_cin_key"));
        }
        let Some(row) = t.cvs.iter_mut().find(|c| c.id == cv.id) else {
            return Ok(None);
        };
        row.name = cv.name.clone();
        row.firstname = cv.firstname.clone();
        row.age = cv.age;
        row.cin = cv.cin;
        row.job = cv.job.clone();
        row.path = cv.path.clone();
        row.updated_at = OffsetDateTime::now_utc();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<u64> {
        let mut t = self.tables();
        let before = t.cvs.len();
        t.cvs.retain(|c| c.id != id);
        t.cv_skills.retain(|(cv_id, _)| *cv_id != id);
        Ok((before - t.cvs.len()) as u64)
    }

    async fn skills_of(&self, cv_ids: &[Uuid]) -> RepoResult<Vec<CvSkillRow>> {
        let t = self.tables();
        let mut rows: Vec<CvSkillRow> = t
            .cv_skills
            .iter()
            .filter(|(cv_id, _)| cv_ids.contains(cv_id))
            .filter_map(|(cv_id, skill_id)| {
                t.skills
                    .iter()
                    .find(|s| s.id == *skill_id)
                    .map(|skill| CvSkillRow {
                        cv_id: *cv_id,
                        skill: skill.clone(),
                    })
            })
            .collect();
        rows.sort_by(|a, b| a.skill.designation.cmp(&b.skill.designation));
        Ok(rows)
    }

    async fn attach_skills(&self, cv_id: Uuid, skill_ids: &[Uuid]) -> RepoResult<u64> {
        let mut t = self.tables();
        let mut inserted = 0;
        for skill_id in skill_ids {
            if !t.cv_skills.contains(&(cv_id, *skill_id)) {
                t.cv_skills.push((cv_id, *skill_id));
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn detach_skill(&self, cv_id: Uuid, skill_id: Uuid) -> RepoResult<u64> {
        let mut t = self.tables();
        let before = t.cv_skills.len();
        t.cv_skills.retain(|pair| *pair != (cv_id, skill_id));
        Ok((before - t.cv_skills.len()) as u64)
    }
}
