//! Routing domain - intents, context windows and grounded replies.
//!
//! Everything here is pure: no I/O and no completion calls. The services in
//! `application::routing` compose these pieces with the ports.

mod catalog;
mod context;
mod intent;
mod keywords;
mod snapshot;

pub use catalog::{agent_capabilities, agent_catalog, AgentCapabilities, AgentProfile};
pub use context::{
    format_transcript, recent_turns, ConversationTurn, TranscriptLabels, TurnRole,
    CLASSIFICATION_WINDOW, RESPONSE_WINDOW,
};
pub use intent::Intent;
pub use keywords::{classify_by_keywords, BILLING_TERMS, ORDER_TERMS, SUPPORT_TERMS};
pub use snapshot::{
    outstanding_balance, DomainSnapshot, FALLBACK_INTENT_REPLY, GOOD_STANDING_REPLY,
    ORDER_APOLOGY_REPLY, SUPPORT_FALLBACK_REPLY,
};

use serde::Serialize;

/// Outcome of routing one inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteResult {
    pub intent: Intent,
    pub reply: String,
}

impl RouteResult {
    pub fn new(intent: Intent, reply: impl Into<String>) -> Self {
        Self {
            intent,
            reply: reply.into(),
        }
    }

    /// The canned result for messages no responder handles.
    pub fn fallback() -> Self {
        Self::new(Intent::Fallback, FALLBACK_INTENT_REPLY)
    }
}
