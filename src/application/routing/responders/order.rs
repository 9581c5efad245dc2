use async_trait::async_trait;
use std::sync::Arc;

use super::{reply_or_fallback, PromptTemplate, Responder, ResponderSettings, GROUNDED_TEMPERATURE};
use crate::domain::foundation::UserId;
use crate::domain::routing::{ConversationTurn, DomainSnapshot, Intent};
use crate::ports::{AIProvider, AccountReader, DataAccessError};

const ORDER_PROMPT: PromptTemplate = PromptTemplate {
    persona: "You are a helpful order tracking specialist.",
    data_heading: Some("Available Orders:"),
    guidelines: &[
        "Reference previous conversation if customer is following up",
        "Provide specific information from order data",
        "Be friendly and professional",
    ],
};

/// Order status and tracking, grounded on the customer's recent orders.
pub struct OrderResponder {
    accounts: Arc<dyn AccountReader>,
    provider: Arc<dyn AIProvider>,
    settings: ResponderSettings,
}

impl OrderResponder {
    pub fn new(
        accounts: Arc<dyn AccountReader>,
        provider: Arc<dyn AIProvider>,
        settings: ResponderSettings,
    ) -> Self {
        Self {
            accounts,
            provider,
            settings,
        }
    }
}

#[async_trait]
impl Responder for OrderResponder {
    fn intent(&self) -> Intent {
        Intent::Order
    }

    async fn respond(
        &self,
        message: &str,
        history: &[ConversationTurn],
        user_id: &UserId,
    ) -> Result<String, DataAccessError> {
        let orders = self.accounts.recent_orders(user_id).await?;
        tracing::debug!(user_id = %user_id, orders = orders.len(), "loaded order snapshot");

        let snapshot = DomainSnapshot::orders(orders);
        let prompt = ORDER_PROMPT.render(&snapshot, history, message);

        Ok(reply_or_fallback(
            Intent::Order,
            self.provider.as_ref(),
            &self.settings,
            Some(GROUNDED_TEMPERATURE),
            prompt,
            &snapshot,
        )
        .await)
    }
}
