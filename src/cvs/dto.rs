use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cvs::repo_types::Cv;
use crate::skills::repo_types::Skill;
use crate::users::repo_types::User;

#[derive(Debug, Deserialize)]
pub struct CreateCvRequest {
    pub user_id: Uuid,
    pub name: String,
    pub firstname: String,
    pub age: i32,
    pub cin: i64,
    pub job: String,
    pub path: String,
}

/// Partial update; the owner cannot be changed here.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCvRequest {
    pub name: Option<String>,
    pub firstname: Option<String>,
    pub age: Option<i32>,
    pub cin: Option<i64>,
    pub job: Option<String>,
    pub path: Option<String>,
}

impl UpdateCvRequest {
    pub fn apply(self, cv: &mut Cv) {
        if let Some(name) = self.name {
            cv.name = name;
        }
        if let Some(firstname) = self.firstname {
            cv.firstname = firstname;
        }
        if let Some(age) = self.age {
            cv.age = age;
        }
        if let Some(cin) = self.cin {
            cv.cin = cin;
        }
        if let Some(job) = self.job {
            cv.job = job;
        }
        if let Some(path) = self.path {
            cv.path = path;
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddSkillsRequest {
    pub skill_ids: Vec<Uuid>,
}

/// CV with its associations. `user` is omitted when it was not loaded or the
/// owner is soft-deleted.
#[derive(Debug, Serialize)]
pub struct CvDetails {
    #[serde(flatten)]
    pub cv: Cv,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub skills: Vec<Skill>,
}
