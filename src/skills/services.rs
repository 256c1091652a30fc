use tracing::{info, warn};
use uuid::Uuid;

use crate::common::MessageResponse;
use crate::error::{conflict_on_unique, AppError};
use crate::skills::dto::{CreateSkillRequest, UpdateSkillRequest};
use crate::skills::repo_types::Skill;
use crate::state::AppState;

fn duplicate_designation(designation: &str) -> String {
    format!("Skill with designation \"{designation}\" already exists")
}

fn skill_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Skill with ID {id} not found"))
}

pub async fn create(state: &AppState, req: CreateSkillRequest) -> Result<Skill, AppError> {
    if state
        .skills
        .find_by_designation(&req.designation)
        .await?
        .is_some()
    {
        warn!(designation = %req.designation, "skill designation taken");
        return Err(AppError::Conflict(duplicate_designation(&req.designation)));
    }

    let skill = state
        .skills
        .insert(Uuid::new_v4(), &req.designation)
        .await
        .map_err(|e| conflict_on_unique(e, || duplicate_designation(&req.designation)))?;

    info!(skill_id = %skill.id, designation = %skill.designation, "skill created");
    Ok(skill)
}

pub async fn find_all(state: &AppState) -> Result<Vec<Skill>, AppError> {
    Ok(state.skills.list().await?)
}

pub async fn find_one(state: &AppState, id: Uuid) -> Result<Skill, AppError> {
    state
        .skills
        .find(id)
        .await?
        .ok_or_else(|| skill_not_found(id))
}

pub async fn update(
    state: &AppState,
    id: Uuid,
    req: UpdateSkillRequest,
) -> Result<Skill, AppError> {
    if let Some(designation) = req.designation.as_deref() {
        if let Some(existing) = state.skills.find_by_designation(designation).await? {
            if existing.id != id {
                warn!(skill_id = %id, %designation, "skill designation taken");
                return Err(AppError::Conflict(duplicate_designation(designation)));
            }
        }
    }

    let mut skill = find_one(state, id).await?;
    req.apply(&mut skill);

    let skill = state
        .skills
        .update(&skill)
        .await
        .map_err(|e| conflict_on_unique(e, || duplicate_designation(&skill.designation)))?
        .ok_or_else(|| skill_not_found(id))?;

    info!(skill_id = %skill.id, "skill updated");
    Ok(skill)
}

pub async fn remove(state: &AppState, id: Uuid) -> Result<MessageResponse, AppError> {
    let skill = find_one(state, id).await?;
    state.skills.delete(id).await?;

    info!(skill_id = %id, designation = %skill.designation, "skill deleted");
    Ok(MessageResponse::new(format!(
        "Skill \"{}\" has been deleted",
        skill.designation
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_req(designation: &str) -> CreateSkillRequest {
        CreateSkillRequest {
            designation: designation.to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_designation_is_rejected_without_writing() {
        let state = AppState::fake();
        create(&state, create_req("Go")).await.expect("first create");

        let before = find_all(&state).await.unwrap().len();
        let err = create(&state, create_req("Go")).await.unwrap_err();
        let after = find_all(&state).await.unwrap().len();

        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("\"Go\"")));
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn find_one_unknown_id_is_not_found() {
        let state = AppState::fake();
        let err = find_one(&state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_rejects_designation_held_by_another_skill() {
        let state = AppState::fake();
        create(&state, create_req("Rust")).await.unwrap();
        let go = create(&state, create_req("Go")).await.unwrap();

        let err = update(
            &state,
            go.id,
            UpdateSkillRequest {
                designation: Some("Rust".into()),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(find_one(&state, go.id).await.unwrap().designation, "Go");
    }

    #[tokio::test]
    async fn update_to_own_designation_is_allowed() {
        let state = AppState::fake();
        let go = create(&state, create_req("Go")).await.unwrap();

        let updated = update(
            &state,
            go.id,
            UpdateSkillRequest {
                designation: Some("Go".into()),
            },
        )
        .await
        .expect("same designation on same record");

        assert_eq!(updated.id, go.id);
    }

    #[tokio::test]
    async fn empty_update_keeps_record() {
        let state = AppState::fake();
        let go = create(&state, create_req("Go")).await.unwrap();

        let updated = update(&state, go.id, UpdateSkillRequest::default())
            .await
            .unwrap();
        assert_eq!(updated.designation, "Go");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let state = AppState::fake();
        let err = update(
            &state,
            Uuid::new_v4(),
            UpdateSkillRequest {
                designation: Some("Zig".into()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_reports_designation_and_deletes() {
        let state = AppState::fake();
        let go = create(&state, create_req("Go")).await.unwrap();

        let msg = remove(&state, go.id).await.unwrap();
        assert_eq!(msg.message, "Skill \"Go\" has been deleted");
        assert!(matches!(
            find_one(&state, go.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            remove(&state, go.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
