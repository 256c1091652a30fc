use serde::{Deserialize, Serialize};

use crate::cvs::repo_types::Cv;
use crate::users::repo_types::User;

/// Request body for user creation.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User together with the CVs it owns.
#[derive(Debug, Serialize)]
pub struct UserWithCvs {
    #[serde(flatten)]
    pub user: User,
    pub cvs: Vec<Cv>,
}
