use async_trait::async_trait;
use std::sync::Arc;

use super::{reply_or_fallback, PromptTemplate, Responder, ResponderSettings};
use crate::domain::foundation::UserId;
use crate::domain::routing::{ConversationTurn, DomainSnapshot, Intent};
use crate::ports::{AIProvider, DataAccessError};

const SUPPORT_PROMPT: PromptTemplate = PromptTemplate {
    persona: "You are a friendly customer support agent.",
    data_heading: None,
    guidelines: &[
        "Reference previous messages if following up",
        "Provide clear, step-by-step instructions",
        "Be empathetic and professional",
        "For password resets: \"Visit Account Settings > Security > Reset Password\"",
        "For account issues: \"Go to Account Settings\"",
    ],
};

/// General help. Reads no records and samples at the backend's default
/// temperature.
pub struct SupportResponder {
    provider: Arc<dyn AIProvider>,
    settings: ResponderSettings,
}

impl SupportResponder {
    pub fn new(provider: Arc<dyn AIProvider>, settings: ResponderSettings) -> Self {
        Self { provider, settings }
    }
}

#[async_trait]
impl Responder for SupportResponder {
    fn intent(&self) -> Intent {
        Intent::Support
    }

    async fn respond(
        &self,
        message: &str,
        history: &[ConversationTurn],
        _user_id: &UserId,
    ) -> Result<String, DataAccessError> {
        let snapshot = DomainSnapshot::None;
        let prompt = SUPPORT_PROMPT.render(&snapshot, history, message);

        Ok(reply_or_fallback(
            Intent::Support,
            self.provider.as_ref(),
            &self.settings,
            None,
            prompt,
            &snapshot,
        )
        .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::routing::SUPPORT_FALLBACK_REPLY;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn prompt_carries_persona_and_password_guidance() {
        let provider = MockAIProvider::new().with_response("Happy to help.");
        let responder = SupportResponder::new(Arc::new(provider.clone()), ResponderSettings::default());

        let reply = responder.respond("I forgot my password", &[], &user()).await.unwrap();

        assert_eq!(reply, "Happy to help.");
        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.starts_with("You are a friendly customer support agent."));
        assert!(prompt.contains("Visit Account Settings > Security > Reset Password"));
        assert!(prompt.ends_with("Customer: I forgot my password\n\nAgent:"));
        assert_eq!(provider.get_calls()[0].temperature, None);
    }

    #[tokio::test]
    async fn outage_yields_canned_reply() {
        let provider = MockAIProvider::new().with_error(MockError::Network {
            message: "reset".to_string(),
        });
        let responder = SupportResponder::new(Arc::new(provider), ResponderSettings::default());

        let reply = responder.respond("help", &[], &user()).await.unwrap();

        assert_eq!(reply, SUPPORT_FALLBACK_REPLY);
    }
}
