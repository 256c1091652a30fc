use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Failure reported by a repository implementation.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A unique index rejected the write; carries the constraint name.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error(transparent)]
    Database(sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] RepoError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Store(e) => {
                error!(error = %e, "store failure");
                "Internal server error".to_string()
            }
            AppError::Internal(e) => {
                error!(error = %e, "internal failure");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Maps a unique violation to `Conflict` with the given message and passes
/// every other store error through.
pub fn conflict_on_unique(e: RepoError, message: impl FnOnce() -> String) -> AppError {
    match e {
        RepoError::UniqueViolation(_) => AppError::Conflict(message()),
        other => AppError::Store(other),
    }
}
