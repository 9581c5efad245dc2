use async_trait::async_trait;
use std::sync::Arc;

use super::{reply_or_fallback, PromptTemplate, Responder, ResponderSettings, GROUNDED_TEMPERATURE};
use crate::domain::foundation::UserId;
use crate::domain::routing::{ConversationTurn, DomainSnapshot, Intent};
use crate::ports::{AIProvider, AccountReader, DataAccessError};

const BILLING_PROMPT: PromptTemplate = PromptTemplate {
    persona: "You are a professional billing specialist.",
    data_heading: Some("Account Billing Information:"),
    guidelines: &[
        "Reference previous conversation if following up",
        "Calculate totals accurately",
        "Mention invoice numbers",
        "Be empathetic about billing concerns",
    ],
};

/// Payments, invoices and refunds, grounded on the customer's recent
/// invoices.
pub struct BillingResponder {
    accounts: Arc<dyn AccountReader>,
    provider: Arc<dyn AIProvider>,
    settings: ResponderSettings,
}

impl BillingResponder {
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
impl Responder for BillingResponder {
    fn intent(&self) -> Intent {
        Intent::Billing
    }

    async fn respond(
        &self,
        message: &str,
        history: &[ConversationTurn],
        user_id: &UserId,
    ) -> Result<String, DataAccessError> {
        let records = self.accounts.recent_billing(user_id).await?;
        tracing::debug!(user_id = %user_id, invoices = records.len(), "loaded billing snapshot");

        let snapshot = DomainSnapshot::billing(records);
        let prompt = BILLING_PROMPT.render(&snapshot, history, message);

        Ok(reply_or_fallback(
            Intent::Billing,
            self.provider.as_ref(),
            &self.settings,
            Some(GROUNDED_TEMPERATURE),
            prompt,
            &snapshot,
        )
        .await)
    }
}
