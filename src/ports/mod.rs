//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the routing core and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - text completion backends
//! - `AccountReader` - read-only order/billing records
//! - `ConversationRepository` - chat transcript persistence
//! - `UserDirectory` - customer accounts
//! - `RateLimiter` - per-client request quotas

mod account_reader;
mod ai_provider;
mod conversation_repository;
mod rate_limiter;
mod user_directory;

pub use account_reader::{AccountReader, DataAccessError, RECENT_RECORD_LIMIT};
pub use ai_provider::{
    complete_with_deadline, AIError, AIProvider, CompletionRequest, CompletionResponse,
    FinishReason, ProviderInfo, TokenUsage,
};
pub use conversation_repository::{
    ConversationRecord, ConversationRepository, ConversationSummary, NewMessage, StoredMessage,
};
pub use rate_limiter::{RateLimitDecision, RateLimitError, RateLimiter};
pub use user_directory::UserDirectory;
