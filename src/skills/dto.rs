use serde::Deserialize;

use crate::skills::repo_types::Skill;

#[derive(Debug, Deserialize)]
pub struct CreateSkillRequest {
    pub designation: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSkillRequest {
    pub designation: Option<String>,
}

impl UpdateSkillRequest {
    /// Overwrites only the supplied fields.
    pub fn apply(self, skill: &mut Skill) {
        if let Some(designation) = self.designation {
            skill.designation = designation;
        }
    }
}
