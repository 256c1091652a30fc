use std::collections::HashMap;

use tracing::{info, warn};
use uuid::Uuid;

use crate::common::MessageResponse;
use crate::cvs::{dto::CvDetails, repo_types::Cv, services::group_skills};
use crate::error::{conflict_on_unique, AppError};
use crate::state::AppState;
use crate::users::dto::{CreateUserRequest, UpdateUserRequest, UserWithCvs};
use crate::users::password::hash_password;
use crate::users::repo_types::{NewUser, User};

fn user_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("User with ID {id} not found"))
}

fn duplicate_email(email: &str) -> String {
    format!("User with email \"{email}\" already exists")
}

async fn load(state: &AppState, id: Uuid) -> Result<User, AppError> {
    state
        .users
        .find_active(id)
        .await?
        .ok_or_else(|| user_not_found(id))
}

async fn with_cvs(state: &AppState, user: User) -> Result<UserWithCvs, AppError> {
    let cvs = state.cvs.list_by_users(&[user.id]).await?;
    Ok(UserWithCvs { user, cvs })
}

pub async fn create(state: &AppState, req: CreateUserRequest) -> Result<User, AppError> {
    if state.users.find_by_email(&req.email).await?.is_some() {
        warn!(email = %req.email, "email already registered");
        return Err(AppError::Conflict(duplicate_email(&req.email)));
    }

    let new_user = NewUser {
        id: Uuid::new_v4(),
        username: req.username,
        email: req.email,
        password_hash: hash_password(&req.password)?,
    };
    let user = state
        .users
        .insert(&new_user)
        .await
        .map_err(|e| conflict_on_unique(e, || duplicate_email(&new_user.email)))?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok(user)
}

pub async fn find_all(state: &AppState) -> Result<Vec<UserWithCvs>, AppError> {
    let users = state.users.list_active().await?;
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let mut cvs_by_user: HashMap<Uuid, Vec<Cv>> = HashMap::new();
    for cv in state.cvs.list_by_users(&ids).await? {
        cvs_by_user.entry(cv.user_id).or_default().push(cv);
    }

    Ok(users
        .into_iter()
        .map(|user| UserWithCvs {
            cvs: cvs_by_user.remove(&user.id).unwrap_or_default(),
            user,
        })
        .collect())
}

pub async fn find_one(state: &AppState, id: Uuid) -> Result<UserWithCvs, AppError> {
    let user = load(state, id).await?;
    with_cvs(state, user).await
}

pub async fn update(
    state: &AppState,
    id: Uuid,
    req: UpdateUserRequest,
) -> Result<User, AppError> {
    let mut user = load(state, id).await?;

    if let Some(email) = req.email {
        if let Some(existing) = state.users.find_by_email(&email).await? {
            if existing.id != id {
                warn!(user_id = %id, %email, "email already registered");
                return Err(AppError::Conflict(duplicate_email(&email)));
            }
        }
        user.email = email;
    }
    if let Some(username) = req.username {
        user.username = username;
    }
    if let Some(password) = req.password {
        user.password_hash = hash_password(&password)?;
    }

    let user = state
        .users
        .update(&user)
        .await
        .map_err(|e| conflict_on_unique(e, || duplicate_email(&user.email)))?
        .ok_or_else(|| user_not_found(id))?;

    info!(user_id = %id, "user updated");
    Ok(user)
}

/// Soft delete: the row stays and can be restored.
pub async fn remove(state: &AppState, id: Uuid) -> Result<MessageResponse, AppError> {
    load(state, id).await?;
    state.users.soft_delete(id).await?;

    info!(user_id = %id, "user soft-deleted");
    Ok(MessageResponse::new(format!(
        "User with ID {id} has been deleted"
    )))
}

/// Clears the deletion stamp. Restoring an active user changes nothing; an id
/// with no row at all is NotFound.
pub async fn restore(state: &AppState, id: Uuid) -> Result<UserWithCvs, AppError> {
    if state.users.restore(id).await? == 0 {
        warn!(user_id = %id, "restore of unknown user");
        return Err(user_not_found(id));
    }

    info!(user_id = %id, "user restored");
    find_one(state, id).await
}

pub async fn hard_remove(state: &AppState, id: Uuid) -> Result<MessageResponse, AppError> {
    if state.users.hard_delete(id).await? == 0 {
        return Err(user_not_found(id));
    }

    info!(user_id = %id, "user permanently deleted");
    Ok(MessageResponse::new(format!(
        "User with ID {id} has been permanently deleted"
    )))
}

pub async fn get_user_cvs(state: &AppState, id: Uuid) -> Result<Vec<CvDetails>, AppError> {
    load(state, id).await?;

    let cvs = state.cvs.list_by_users(&[id]).await?;
    let cv_ids: Vec<Uuid> = cvs.iter().map(|cv| cv.id).collect();
    let mut skills = if cv_ids.is_empty() {
        HashMap::new()
    } else {
        group_skills(state.cvs.skills_of(&cv_ids).await?)
    };

    Ok(cvs
        .into_iter()
        .map(|cv| CvDetails {
            skills: skills.remove(&cv.id).unwrap_or_default(),
            user: None,
            cv,
        })
        .collect())
}
