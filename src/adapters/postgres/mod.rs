//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAccountReader` - recent orders and invoices per customer
//! - `PostgresConversationRepository` - conversations and their messages
//! - `PostgresUserDirectory` - customer accounts

mod account_reader;
mod conversation_repository;
mod pool;
mod user_directory;

pub use account_reader::PostgresAccountReader;
pub use conversation_repository::PostgresConversationRepository;
pub use pool::{connect, run_migrations, MIGRATOR};
pub use user_directory::PostgresUserDirectory;
