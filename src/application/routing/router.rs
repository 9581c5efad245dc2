//! Intent router - classify, dispatch, reply.

use std::sync::Arc;

use super::classifier::IntentClassifier;
use super::errors::RouteError;
use super::responders::Responder;
use crate::domain::foundation::UserId;
use crate::domain::routing::{ConversationTurn, Intent, RouteResult};

/// The fixed intent to responder table.
pub struct ResponderSet {
    support: Arc<dyn Responder>,
    order: Arc<dyn Responder>,
    billing: Arc<dyn Responder>,
}

impl ResponderSet {
    pub fn new(
        support: Arc<dyn Responder>,
        order: Arc<dyn Responder>,
        billing: Arc<dyn Responder>,
    ) -> Self {
        Self {
            support,
            order,
            billing,
        }
    }

    /// Responder for `intent`; `None` for [`Intent::Fallback`].
    pub fn for_intent(&self, intent: Intent) -> Option<&Arc<dyn Responder>> {
        match intent {
            Intent::Support => Some(&self.support),
            Intent::Order => Some(&self.order),
            Intent::Billing => Some(&self.billing),
            Intent::Fallback => None,
        }
    }
}

/// Routes each inbound message to exactly one responder, or to the canned
/// fallback reply.
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct IntentRouter {
    classifier: IntentClassifier,
    responders: ResponderSet,
}

impl IntentRouter {
    pub fn new(classifier: IntentClassifier, responders: ResponderSet) -> Self {
        Self {
            classifier,
            responders,
        }
    }

    /// Classifies `message` and produces its reply.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DataAccess`] when the chosen responder cannot
    /// read the customer's records. Completion failures never surface here.
    pub async fn route(
        &self,
        message: &str,
        history: &[ConversationTurn],
        user_id: &UserId,
    ) -> Result<RouteResult, RouteError> {
        let intent = self.classifier.classify(message, history).await;

        let Some(responder) = self.responders.for_intent(intent) else {
            tracing::info!(user_id = %user_id, "no intent matched, using fallback reply");
            return Ok(RouteResult::fallback());
        };

        let reply = responder.respond(message, history, user_id).await?;
        tracing::info!(user_id = %user_id, intent = %intent, reply_len = reply.len(), "message routed");

        Ok(RouteResult::new(intent, reply))
    }
}
