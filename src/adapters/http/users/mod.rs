//! HTTP adapter for the customer directory.

pub mod handlers;
pub mod routes;

pub use handlers::UsersAppState;
pub use routes::users_router;
