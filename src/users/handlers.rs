use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    common::MessageResponse,
    cvs::dto::CvDetails,
    error::AppError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, UpdateUserRequest, UserWithCvs},
        repo_types::User,
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/:id",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .route("/users/:id/restore", patch(restore_user))
        .route("/users/:id/hard", delete(hard_delete_user))
        .route("/users/:id/cvs", get(get_user_cvs))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = services::create(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithCvs>>, AppError> {
    Ok(Json(services::find_all(&state).await?))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserWithCvs>, AppError> {
    Ok(Json(services::find_one(&state, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    Ok(Json(services::update(&state, id, payload).await?))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(services::remove(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn restore_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserWithCvs>, AppError> {
    Ok(Json(services::restore(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn hard_delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(services::hard_remove(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn get_user_cvs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CvDetails>>, AppError> {
    Ok(Json(services::get_user_cvs(&state, id).await?))
}
