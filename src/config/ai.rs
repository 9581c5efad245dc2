//! AI provider configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on `max_retries`.
pub const MAX_RETRIES_LIMIT: u32 = 5;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// OpenAI model identifier
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Gemini model identifier
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Backend asked first to classify a message
    #[serde(default = "default_primary_classifier")]
    pub primary_classifier: AiProvider,

    /// Backend asked when the primary declines
    #[serde(default = "default_secondary_classifier")]
    pub secondary_classifier: Option<AiProvider>,

    /// Backend generating responder replies
    #[serde(default = "default_responder_provider")]
    pub responder_provider: AiProvider,

    /// Per-call deadline in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    OpenAI,
    Gemini,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::OpenAI => "openai",
            AiProvider::Gemini => "gemini",
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key for `provider`, if one is configured and non-empty.
    pub fn api_key(&self, provider: AiProvider) -> Option<&str> {
        let key = match provider {
            AiProvider::OpenAI => self.openai_api_key.as_deref(),
            AiProvider::Gemini => self.gemini_api_key.as_deref(),
        };
        key.filter(|k| !k.is_empty())
    }

    /// Check if `provider` has an API key
    pub fn has_key(&self, provider: AiProvider) -> bool {
        self.api_key(provider).is_some()
    }

    /// Model configured for `provider`.
    pub fn model(&self, provider: AiProvider) -> &str {
        match provider {
            AiProvider::OpenAI => &self.openai_model,
            AiProvider::Gemini => &self.gemini_model,
        }
    }

    /// Classification backends in the order they are tried, without
    /// duplicates.
    pub fn classifier_order(&self) -> Vec<AiProvider> {
        let mut order = vec![self.primary_classifier];
        if let Some(secondary) = self.secondary_classifier {
            if secondary != self.primary_classifier {
                order.push(secondary);
            }
        }
        order
    }

    /// Longest time routing one message can spend in completion calls:
    /// every classifier strategy times out, then the responder does too.
    /// Each call is cut off at [`AiConfig::timeout`], retries included.
    pub fn worst_case_routing(&self) -> Duration {
        let calls = self.classifier_order().len() as u32 + 1;
        self.timeout() * calls
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_key(AiProvider::OpenAI) && !self.has_key(AiProvider::Gemini) {
            return Err(ValidationError::NoAiProviderConfigured);
        }

        // Responders have a single backend, so it must be usable
        if !self.has_key(self.responder_provider) {
            return Err(ValidationError::MissingRequired(match self.responder_provider {
                AiProvider::OpenAI => "OPENAI_API_KEY",
                AiProvider::Gemini => "GEMINI_API_KEY",
            }));
        }

        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidAiTimeout);
        }

        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ValidationError::TooManyRetries(
                self.max_retries,
                MAX_RETRIES_LIMIT,
            ));
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            gemini_api_key: None,
            openai_model: default_openai_model(),
            gemini_model: default_gemini_model(),
            primary_classifier: default_primary_classifier(),
            secondary_classifier: default_secondary_classifier(),
            responder_provider: default_responder_provider(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_primary_classifier() -> AiProvider {
    AiProvider::OpenAI
}

fn default_secondary_classifier() -> Option<AiProvider> {
    Some(AiProvider::Gemini)
}

fn default_responder_provider() -> AiProvider {
    AiProvider::Gemini
}

fn default_timeout() -> u64 {
    20
}

fn default_retries() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_keys() -> AiConfig {
        AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            gemini_api_key: Some("AIza-xxx".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.primary_classifier, AiProvider::OpenAI);
        assert_eq!(config.secondary_classifier, Some(AiProvider::Gemini));
        assert_eq!(config.responder_provider, AiProvider::Gemini);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 5,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let config = AiConfig {
            openai_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_key(AiProvider::OpenAI));
        assert_eq!(config.api_key(AiProvider::OpenAI), None);
    }

    #[test]
    fn test_validation_no_provider() {
        assert!(matches!(
            AiConfig::default().validate(),
            Err(ValidationError::NoAiProviderConfigured)
        ));
    }

    #[test]
    fn test_validation_responder_missing_key() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        ));
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let config = AiConfig {
            timeout_secs: 0,
            ..with_keys()
        };
        assert!(config.validate().is_err());

        let config = AiConfig {
            timeout_secs: 121,
            ..with_keys()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_retry_cap() {
        let config = AiConfig {
            max_retries: MAX_RETRIES_LIMIT,
            ..with_keys()
        };
        assert!(config.validate().is_ok());

        let config = AiConfig {
            max_retries: 64,
            ..with_keys()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::TooManyRetries(64, MAX_RETRIES_LIMIT))
        ));
    }

    #[test]
    fn test_worst_case_routing_counts_every_call() {
        // Two classifiers then the responder.
        assert_eq!(AiConfig::default().worst_case_routing(), Duration::from_secs(60));

        let single = AiConfig {
            secondary_classifier: None,
            timeout_secs: 10,
            ..Default::default()
        };
        assert_eq!(single.worst_case_routing(), Duration::from_secs(20));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(with_keys().validate().is_ok());
    }

    #[test]
    fn test_classifier_order_skips_duplicates() {
        let config = AiConfig {
            secondary_classifier: Some(AiProvider::OpenAI),
            ..Default::default()
        };
        assert_eq!(config.classifier_order(), vec![AiProvider::OpenAI]);
        assert_eq!(
            AiConfig::default().classifier_order(),
            vec![AiProvider::OpenAI, AiProvider::Gemini]
        );
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(AiProvider::OpenAI.to_string(), "openai");
        assert_eq!(AiProvider::Gemini.as_str(), "gemini");
        assert_eq!(with_keys().model(AiProvider::Gemini), "gemini-2.0-flash");
    }
}
