//! HTTP handlers for the customer directory.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::UserId;
use crate::ports::UserDirectory;

/// Shared state for user endpoints.
#[derive(Clone)]
pub struct UsersAppState {
    pub directory: Arc<dyn UserDirectory>,
}

impl UsersAppState {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}

/// GET /api/users - All customers ordered by name
pub async fn list_users(State(state): State<UsersAppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.directory.list_users().await?;
    Ok(Json(users))
}

/// GET /api/users/:id - One customer
pub async fn get_user(
    State(state): State<UsersAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = UserId::new(id).map_err(|_| user_not_found())?;
    let user = state
        .directory
        .find_user(&user_id)
        .await?
        .ok_or_else(user_not_found)?;
    Ok(Json(user))
}
