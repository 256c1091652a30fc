use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    common::MessageResponse,
    error::AppError,
    skills::{
        dto::{CreateSkillRequest, UpdateSkillRequest},
        repo_types::Skill,
        services,
    },
    state::AppState,
};

pub fn skill_routes() -> Router<AppState> {
    Router::new()
        .route("/skills", post(create_skill).get(list_skills))
        .route(
            "/skills/:id",
            get(get_skill).patch(update_skill).delete(delete_skill),
        )
}

#[instrument(skip(state))]
pub async fn create_skill(
    State(state): State<AppState>,
    Json(payload): Json<CreateSkillRequest>,
) -> Result<(StatusCode, Json<Skill>), AppError> {
    let skill = services::create(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

#[instrument(skip(state))]
pub async fn list_skills(State(state): State<AppState>) -> Result<Json<Vec<Skill>>, AppError> {
    Ok(Json(services::find_all(&state).await?))
}

#[instrument(skip(state))]
pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Skill>, AppError> {
    Ok(Json(services::find_one(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSkillRequest>,
) -> Result<Json<Skill>, AppError> {
    Ok(Json(services::update(&state, id, payload).await?))
}

#[instrument(skip(state))]
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(services::remove(&state, id).await?))
}
