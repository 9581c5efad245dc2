//! In-memory adapters for tests and database-less runs.

mod account_store;
mod conversation_repository;
mod rate_limiter;

pub use account_store::InMemoryAccountStore;
pub use conversation_repository::InMemoryConversationRepository;
pub use rate_limiter::InMemoryRateLimiter;
