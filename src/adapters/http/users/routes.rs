//! Axum router configuration for user endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_user, list_users, UsersAppState};

/// Users router, ready to mount at `/api`.
///
/// # Routes
/// - `GET /users` - List customers
/// - `GET /users/:id` - One customer
pub fn users_router() -> Router<UsersAppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
}
