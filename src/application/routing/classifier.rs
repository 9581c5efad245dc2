//! Intent classifier - an ordered cascade of classification strategies.
//!
//! Each completion-backed strategy gets the same prompt. The first one to
//! answer with a recognized label wins; every failure is logged and the next
//! strategy is tried. When all of them decline, keyword matching on the raw
//! message decides, and that step cannot fail.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::errors::ClassificationError;
use crate::domain::routing::{
    classify_by_keywords, format_transcript, recent_turns, ConversationTurn, Intent,
    TranscriptLabels, CLASSIFICATION_WINDOW,
};
use crate::ports::{complete_with_deadline, AIProvider, CompletionRequest};

/// Output budget for a classification call. One word is expected.
pub const CLASSIFICATION_MAX_TOKENS: u32 = 10;

/// One way of turning a classification prompt into an intent.
#[async_trait]
pub trait ClassificationStrategy: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Attempts a classification. Errors make the classifier move on.
    async fn attempt(&self, prompt: &str) -> Result<Intent, ClassificationError>;
}

/// Asks a completion backend for a one-word label.
pub struct CompletionStrategy {
    name: String,
    provider: Arc<dyn AIProvider>,
    deadline: Duration,
}

impl CompletionStrategy {
    pub fn new(name: impl Into<String>, provider: Arc<dyn AIProvider>, deadline: Duration) -> Self {
        Self {
            name: name.into(),
            provider,
            deadline,
        }
    }
}

#[async_trait]
impl ClassificationStrategy for CompletionStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, prompt: &str) -> Result<Intent, ClassificationError> {
        let request = CompletionRequest::new(prompt).with_max_tokens(CLASSIFICATION_MAX_TOKENS);
        let response = complete_with_deadline(self.provider.as_ref(), request, self.deadline).await?;

        let label = response.content.trim();
        if label.is_empty() {
            return Err(ClassificationError::Empty);
        }

        Intent::from_label(label).ok_or_else(|| ClassificationError::Unrecognized(label.to_string()))
    }
}

/// Classifies messages by running strategies in order, then keywords.
pub struct IntentClassifier {
    strategies: Vec<Box<dyn ClassificationStrategy>>,
}

impl IntentClassifier {
    pub fn new(strategies: Vec<Box<dyn ClassificationStrategy>>) -> Self {
        Self { strategies }
    }

    /// A classifier with no completion strategies; keywords only.
    pub fn keywords_only() -> Self {
        Self::new(Vec::new())
    }

    /// Names of the configured strategies, in the order they run.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Classifies `message` in the context of `history`. Never fails.
    pub async fn classify(&self, message: &str, history: &[ConversationTurn]) -> Intent {
        let prompt = classification_prompt(message, history);
        tracing::debug!(prompt_len = prompt.len(), "built classification prompt");

        for strategy in &self.strategies {
            match strategy.attempt(&prompt).await {
                Ok(intent) => {
                    tracing::info!(strategy = strategy.name(), intent = %intent, "message classified");
                    return intent;
                }
                Err(err) => {
                    tracing::warn!(strategy = strategy.name(), error = %err, "classification strategy declined");
                }
            }
        }

        let intent = classify_by_keywords(message);
        tracing::info!(strategy = "keywords", intent = %intent, "message classified");
        intent
    }
}

/// Renders the prompt shared by all completion strategies.
pub fn classification_prompt(message: &str, history: &[ConversationTurn]) -> String {
    let recent = recent_turns(history, CLASSIFICATION_WINDOW);
    let context = if recent.is_empty() {
        String::new()
    } else {
        format!(
            "\n\nRecent conversation:\n{}\n\nCurrent message:\n",
            format_transcript(recent, TranscriptLabels::CLASSIFIER)
        )
    };

    format!(
        "You are a customer support intent classifier.\n\n\
         {context}user: {message}\n\n\
         Available agents:\n\
         - \"support\": General help, account issues, passwords, features, how-to\n\
         - \"order\": Order tracking, delivery, shipment, modifications, cancellations\n\
         - \"billing\": Payments, invoices, refunds, billing, charges, balance\n\n\
         Respond with ONLY one word: support, order, or billing",
        context = context,
        message = message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    fn strategy(name: &str, provider: &MockAIProvider) -> Box<dyn ClassificationStrategy> {
        Box::new(CompletionStrategy::new(
            name,
            Arc::new(provider.clone()),
            Duration::from_secs(1),
        ))
    }

    #[tokio::test]
    async fn primary_answer_wins() {
        let primary = MockAIProvider::new().with_response("billing");
        let secondary = MockAIProvider::new().with_response("order");
        let classifier = IntentClassifier::new(vec![
            strategy("primary", &primary),
            strategy("secondary", &secondary),
        ]);

        let intent = classifier.classify("hello there", &[]).await;

        assert_eq!(intent, Intent::Billing);
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn answer_is_trimmed_and_lowercased() {
        let primary = MockAIProvider::new().with_response("  Support\n");
        let classifier = IntentClassifier::new(vec![strategy("primary", &primary)]);

        assert_eq!(classifier.classify("hi", &[]).await, Intent::Support);
    }

    #[tokio::test]
    async fn unrecognized_token_falls_through_to_secondary() {
        let primary = MockAIProvider::new().with_response("I think it's about shipping");
        let secondary = MockAIProvider::new().with_response("order");
        let classifier = IntentClassifier::new(vec![
            strategy("primary", &primary),
            strategy("secondary", &secondary),
        ]);

        assert_eq!(classifier.classify("hello", &[]).await, Intent::Order);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn unrecognized_tokens_fall_through_to_keywords() {
        let primary = MockAIProvider::new().with_response("maybe");
        let secondary = MockAIProvider::new().with_response("fallback");
        let classifier = IntentClassifier::new(vec![
            strategy("primary", &primary),
            strategy("secondary", &secondary),
        ]);

        let intent = classifier.classify("I need a refund", &[]).await;

        assert_eq!(intent, Intent::Billing);
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn backend_errors_and_empty_answers_decline() {
        let primary = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let secondary = MockAIProvider::new().with_response("   ");
        let classifier = IntentClassifier::new(vec![
            strategy("primary", &primary),
            strategy("secondary", &secondary),
        ]);

        assert_eq!(classifier.classify("where is my package", &[]).await, Intent::Order);
    }

    #[tokio::test]
    async fn slow_backend_is_cut_off_by_deadline() {
        let slow = MockAIProvider::new()
            .with_response("billing")
            .with_delay(Duration::from_millis(200));
        let classifier = IntentClassifier::new(vec![Box::new(CompletionStrategy::new(
            "slow",
            Arc::new(slow),
            Duration::from_millis(10),
        ))]);

        assert_eq!(classifier.classify("reset my password", &[]).await, Intent::Support);
    }

    #[tokio::test]
    async fn keyword_layer_yields_fallback_without_match() {
        let classifier = IntentClassifier::keywords_only();
        assert_eq!(classifier.classify("hello there", &[]).await, Intent::Fallback);
    }

    #[tokio::test]
    async fn strategies_request_ten_tokens() {
        let primary = MockAIProvider::new().with_response("order");
        let classifier = IntentClassifier::new(vec![strategy("primary", &primary)]);

        classifier.classify("track it", &[]).await;

        let calls = primary.get_calls();
        assert_eq!(calls[0].max_tokens, Some(CLASSIFICATION_MAX_TOKENS));
        assert_eq!(calls[0].temperature, None);
    }

    #[tokio::test]
    async fn strategy_error_variants() {
        let provider = MockAIProvider::new().with_response("");
        let strategy = CompletionStrategy::new("p", Arc::new(provider), Duration::from_secs(1));

        assert!(matches!(
            strategy.attempt("prompt").await,
            Err(ClassificationError::Empty)
        ));
    }

    #[test]
    fn strategy_names_keep_order() {
        let a = MockAIProvider::new();
        let b = MockAIProvider::new();
        let classifier = IntentClassifier::new(vec![strategy("openai", &a), strategy("gemini", &b)]);
        assert_eq!(classifier.strategy_names(), vec!["openai", "gemini"]);
    }

    #[test]
    fn prompt_without_history_has_no_context_block() {
        let prompt = classification_prompt("where is my order", &[]);

        assert!(prompt.starts_with("You are a customer support intent classifier.\n\nuser: where is my order\n\n"));
        assert!(!prompt.contains("Recent conversation"));
        assert!(prompt.ends_with("Respond with ONLY one word: support, order, or billing"));
    }

    #[test]
    fn prompt_embeds_last_four_turns() {
        let history: Vec<ConversationTurn> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationTurn::user(format!("question {}", i))
                } else {
                    ConversationTurn::assistant(format!("answer {}", i))
                }
            })
            .collect();

        let prompt = classification_prompt("and now?", &history);

        assert!(prompt.contains(
            "Recent conversation:\nuser: question 6\nassistant: answer 7\nuser: question 8\nassistant: answer 9\n\nCurrent message:\nuser: and now?"
        ));
        assert!(!prompt.contains("answer 5"));
    }
}
