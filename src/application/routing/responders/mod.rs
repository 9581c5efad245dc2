//! Responders - turn a classified message into a grounded reply.
//!
//! Each responder reads the records it needs through the [`AccountReader`]
//! port, asks a completion backend for a reply and, when that fails, answers
//! from the records alone. Only a failure to read records is returned to the
//! caller.
//!
//! [`AccountReader`]: crate::ports::AccountReader

mod billing;
mod order;
mod prompt;
mod support;

pub use billing::BillingResponder;
pub use order::OrderResponder;
pub use prompt::PromptTemplate;
pub use support::SupportResponder;

use async_trait::async_trait;
use std::time::Duration;

use super::errors::ResponderError;
use crate::domain::foundation::UserId;
use crate::domain::routing::{ConversationTurn, DomainSnapshot, Intent};
use crate::ports::{complete_with_deadline, AIProvider, CompletionRequest, DataAccessError};

/// Output budget for a generated reply.
pub const RESPONSE_MAX_TOKENS: u32 = 200;

/// Sampling temperature for responders that quote records.
pub const GROUNDED_TEMPERATURE: f32 = 0.3;

/// Produces the reply for one intent.
#[async_trait]
pub trait Responder: Send + Sync {
    /// The intent this responder serves.
    fn intent(&self) -> Intent;

    /// Replies to `message`. Completion failures are absorbed.
    async fn respond(
        &self,
        message: &str,
        history: &[ConversationTurn],
        user_id: &UserId,
    ) -> Result<String, DataAccessError>;
}

/// Generation limits applied by every responder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponderSettings {
    pub deadline: Duration,
    pub max_tokens: u32,
}

impl ResponderSettings {
    pub fn new(deadline: Duration) -> Self {
        Self {
            deadline,
            max_tokens: RESPONSE_MAX_TOKENS,
        }
    }
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self::new(Duration::from_secs(20))
    }
}

/// Asks `provider` for a reply; an error, expired deadline or blank result
/// yields the snapshot's deterministic reply instead.
pub(crate) async fn reply_or_fallback(
    intent: Intent,
    provider: &dyn AIProvider,
    settings: &ResponderSettings,
    temperature: Option<f32>,
    prompt: String,
    snapshot: &DomainSnapshot,
) -> String {
    let mut request = CompletionRequest::new(prompt).with_max_tokens(settings.max_tokens);
    if let Some(temperature) = temperature {
        request = request.with_temperature(temperature);
    }

    match generate(provider, request, settings.deadline).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(
                intent = %intent,
                backend = %provider.provider_info().name,
                error = %err,
                "responder fell back to deterministic reply"
            );
            snapshot.deterministic_reply()
        }
    }
}

async fn generate(
    provider: &dyn AIProvider,
    request: CompletionRequest,
    deadline: Duration,
) -> Result<String, ResponderError> {
    let response = complete_with_deadline(provider, request, deadline).await?;
    if response.content.trim().is_empty() {
        return Err(ResponderError::EmptyCompletion);
    }
    Ok(response.content)
}
