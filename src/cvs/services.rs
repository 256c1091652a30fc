use std::collections::{HashMap, HashSet};

use tracing::{info, warn};
use uuid::Uuid;

use crate::common::MessageResponse;
use crate::cvs::dto::{AddSkillsRequest, CreateCvRequest, CvDetails, UpdateCvRequest};
use crate::cvs::repo_types::{Cv, CvSkillRow, NewCv};
use crate::error::{conflict_on_unique, AppError};
use crate::skills::repo_types::Skill;
use crate::state::AppState;
use crate::users::repo_types::User;

fn cv_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("CV with ID {id} not found"))
}

fn duplicate_cin(cin: i64) -> String {
    format!("CV with CIN {cin} already exists")
}

/// Buckets join rows by CV, keeping the order the store returned them in.
pub(crate) fn group_skills(rows: Vec<CvSkillRow>) -> HashMap<Uuid, Vec<Skill>> {
    let mut by_cv: HashMap<Uuid, Vec<Skill>> = HashMap::new();
    for row in rows {
        by_cv.entry(row.cv_id).or_default().push(row.skill);
    }
    by_cv
}

async fn load(state: &AppState, id: Uuid) -> Result<Cv, AppError> {
    state.cvs.find(id).await?.ok_or_else(|| cv_not_found(id))
}

async fn current_skills(state: &AppState, id: Uuid) -> Result<Vec<Skill>, AppError> {
    let rows = state.cvs.skills_of(&[id]).await?;
    Ok(rows.into_iter().map(|r| r.skill).collect())
}

async fn ensure_cin_free(state: &AppState, cin: i64, owner: Option<Uuid>) -> Result<(), AppError> {
    if let Some(existing) = state.cvs.find_by_cin(cin).await? {
        if Some(existing.id) != owner {
            warn!(cin, "cv cin taken");
            return Err(AppError::Conflict(duplicate_cin(cin)));
        }
    }
    Ok(())
}

pub async fn create(state: &AppState, req: CreateCvRequest) -> Result<Cv, AppError> {
    let user = state
        .users
        .find_active(req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found", req.user_id)))?;

    ensure_cin_free(state, req.cin, None).await?;

    let new_cv = NewCv {
        id: Uuid::new_v4(),
        user_id: user.id,
        name: req.name,
        firstname: req.firstname,
        age: req.age,
        cin: req.cin,
        job: req.job,
        path: req.path,
    };
    let cv = state
        .cvs
        .insert(&new_cv)
        .await
        .map_err(|e| conflict_on_unique(e, || duplicate_cin(new_cv.cin)))?;

    info!(cv_id = %cv.id, user_id = %user.id, "cv created");
    Ok(cv)
}

pub async fn find_all(state: &AppState) -> Result<Vec<CvDetails>, AppError> {
    let cvs = state.cvs.list().await?;
    if cvs.is_empty() {
        return Ok(Vec::new());
    }

    let cv_ids: Vec<Uuid> = cvs.iter().map(|cv| cv.id).collect();
    let owner_ids: Vec<Uuid> = cvs
        .iter()
        .map(|cv| cv.user_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let owners: HashMap<Uuid, User> = state
        .users
        .find_many_active(&owner_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let mut skills = group_skills(state.cvs.skills_of(&cv_ids).await?);

    Ok(cvs
        .into_iter()
        .map(|cv| CvDetails {
            user: owners.get(&cv.user_id).cloned(),
            skills: skills.remove(&cv.id).unwrap_or_default(),
            cv,
        })
        .collect())
}

pub async fn find_one(state: &AppState, id: Uuid) -> Result<CvDetails, AppError> {
    let cv = load(state, id).await?;
    let user = state.users.find_active(cv.user_id).await?;
    let skills = current_skills(state, id).await?;
    Ok(CvDetails { cv, user, skills })
}

pub async fn update(state: &AppState, id: Uuid, req: UpdateCvRequest) -> Result<Cv, AppError> {
    let mut cv = load(state, id).await?;
    if let Some(cin) = req.cin {
        ensure_cin_free(state, cin, Some(id)).await?;
    }
    req.apply(&mut cv);

    let cv = state
        .cvs
        .update(&cv)
        .await
        .map_err(|e| conflict_on_unique(e, || duplicate_cin(cv.cin)))?
        .ok_or_else(|| cv_not_found(id))?;

    info!(cv_id = %id, "cv updated");
    Ok(cv)
}

pub async fn remove(state: &AppState, id: Uuid) -> Result<MessageResponse, AppError> {
    load(state, id).await?;
    state.cvs.delete(id).await?;

    info!(cv_id = %id, "cv deleted");
    Ok(MessageResponse::new(format!("CV with ID {id} has been deleted")))
}

pub async fn get_skills(state: &AppState, id: Uuid) -> Result<Vec<Skill>, AppError> {
    load(state, id).await?;
    current_skills(state, id).await
}

/// Attaches skills all-or-nothing: one unknown id rejects the whole request.
/// Skills already on the CV and ids repeated in the request are skipped.
/// The returned skills are ordered by designation, not by attach order.
pub async fn add_skills(
    state: &AppState,
    id: Uuid,
    req: AddSkillsRequest,
) -> Result<CvDetails, AppError> {
    let cv = load(state, id).await?;

    let mut seen = HashSet::new();
    let requested: Vec<Uuid> = req
        .skill_ids
        .into_iter()
        .filter(|skill_id| seen.insert(*skill_id))
        .collect();

    let found = state.skills.find_many(&requested).await?;
    if found.len() != requested.len() {
        warn!(cv_id = %id, requested = requested.len(), found = found.len(), "unknown skill ids");
        return Err(AppError::BadRequest(
            "One or more skill IDs are invalid".into(),
        ));
    }

    let existing: HashSet<Uuid> = current_skills(state, id)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();
    let new_ids: Vec<Uuid> = requested
        .into_iter()
        .filter(|skill_id| !existing.contains(skill_id))
        .collect();

    if !new_ids.is_empty() {
        state.cvs.attach_skills(id, &new_ids).await?;
        info!(cv_id = %id, added = new_ids.len(), "skills attached");
    }

    let skills = current_skills(state, id).await?;
    Ok(CvDetails {
        cv,
        user: None,
        skills,
    })
}

pub async fn remove_skill(
    state: &AppState,
    cv_id: Uuid,
    skill_id: Uuid,
) -> Result<CvDetails, AppError> {
    let cv = load(state, cv_id).await?;
    let mut skills = current_skills(state, cv_id).await?;

    let Some(index) = skills.iter().position(|s| s.id == skill_id) else {
        warn!(%cv_id, %skill_id, "skill not attached to cv");
        return Err(AppError::NotFound(format!(
            "Skill with ID {skill_id} not found in this CV"
        )));
    };

    state.cvs.detach_skill(cv_id, skill_id).await?;
    skills.remove(index);

    info!(%cv_id, %skill_id, "skill detached");
    Ok(CvDetails {
        cv,
        user: None,
        skills,
    })
}
