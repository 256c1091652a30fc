use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    common::MessageResponse,
    cvs::{
        dto::{AddSkillsRequest, CreateCvRequest, CvDetails, UpdateCvRequest},
        repo_types::Cv,
        services,
    },
    error::AppError,
    skills::repo_types::Skill,
    state::AppState,
};

pub fn cv_routes() -> Router<AppState> {
    Router::new()
        .route("/cvs", post(create_cv).get(list_cvs))
        .route("/cvs/:id", get(get_cv).patch(update_cv).delete(delete_cv))
}

pub fn cv_skill_routes() -> Router<AppState> {
    Router::new()
        .route("/cvs/:id/skills", get(list_cv_skills).post(add_cv_skills))
        .route("/cvs/:id/skills/:skill_id", delete(remove_cv_skill))
}

#[instrument(skip(state))]
pub async fn create_cv(
    State(state): State<AppState>,
    Json(payload): Json<CreateCvRequest>,
) -> Result<(StatusCode, Json<Cv>), AppError> {
    let cv = services::create(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(cv)))
}

#[instrument(skip(state))]
pub async fn list_cvs(State(state): State<AppState>) -> Result<Json<Vec<CvDetails>>, AppError> {
    Ok(Json(services::find_all(&state).await?))
}

#[instrument(skip(state))]
pub async fn get_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CvDetails>, AppError> {
    Ok(Json(services::find_one(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn update_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCvRequest>,
) -> Result<Json<Cv>, AppError> {
    Ok(Json(services::update(&state, id, payload).await?))
}

#[instrument(skip(state))]
pub async fn delete_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(services::remove(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn list_cv_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Skill>>, AppError> {
    Ok(Json(services::get_skills(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn add_cv_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddSkillsRequest>,
) -> Result<Json<CvDetails>, AppError> {
    Ok(Json(services::add_skills(&state, id, payload).await?))
}

#[instrument(skip(state))]
pub async fn remove_cv_skill(
    State(state): State<AppState>,
    Path((id, skill_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CvDetails>, AppError> {
    Ok(Json(services::remove_skill(&state, id, skill_id).await?))
}
