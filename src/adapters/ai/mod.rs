//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for the completion backends.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - OpenAI chat completions (gpt-4o-mini by default)
//! - `GeminiProvider` - Google Gemini generateContent (gemini-2.0-flash by default)

mod gemini_provider;
mod mock_provider;
mod openai_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};

use std::time::Duration;

/// Longest pause between two attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(8);

/// Pause before retry number `attempt` (zero-based): 1s, 2s, 4s, then capped
/// at [`MAX_BACKOFF`].
pub(crate) fn retry_backoff(attempt: u32) -> Duration {
    2u64.checked_pow(attempt)
        .map(Duration::from_secs)
        .map_or(MAX_BACKOFF, |delay| delay.min(MAX_BACKOFF))
}
