//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers and routes. [`api_router`]
//! assembles them under `/api` behind the per-client rate limit.

pub mod agents;
pub mod chat;
pub mod error;
pub mod health;
pub mod rate_limit;
pub mod users;

use axum::{middleware, Router};

pub use agents::agents_router;
pub use chat::{chat_router, ChatAppState};
pub use error::{ApiError, ErrorResponse};
pub use health::health_router;
pub use rate_limit::{rate_limit_middleware, RateLimiterState};
pub use users::{users_router, UsersAppState};

/// The complete REST API mounted at `/api`.
pub fn api_router(chat: ChatAppState, users: UsersAppState, limiter: RateLimiterState) -> Router {
    let api = Router::new()
        .merge(chat_router().with_state(chat))
        .merge(users_router().with_state(users))
        .merge(agents_router())
        .merge(health_router());

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
}
