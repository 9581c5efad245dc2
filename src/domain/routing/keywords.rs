//! Keyword classification - the last, purely local layer of the cascade.
//!
//! Rules are checked in priority order (order, billing, support) against the
//! lowercased message. A rule matches when any of its terms occurs as a
//! substring, so "shipping" matches "ship" and "payments" matches "pay".

use once_cell::sync::Lazy;
use regex::Regex;

use super::Intent;

/// Order terms, checked first.
pub const ORDER_TERMS: &[&str] = &[
    "order", "track", "delivery", "ship", "package", "status", "arrive", "eta",
];

/// Billing terms, checked second.
pub const BILLING_TERMS: &[&str] = &[
    "bill",
    "payment",
    "invoice",
    "refund",
    "charge",
    "balance",
    "subscription",
    "owe",
    "pay",
];

/// Support terms, checked last.
pub const SUPPORT_TERMS: &[&str] = &[
    "help", "support", "account", "password", "reset", "feature", "how", "question",
];

static KEYWORD_RULES: Lazy<Vec<(Intent, Regex)>> = Lazy::new(|| {
    [
        (Intent::Order, ORDER_TERMS),
        (Intent::Billing, BILLING_TERMS),
        (Intent::Support, SUPPORT_TERMS),
    ]
    .into_iter()
    .map(|(intent, terms)| (intent, alternation(terms)))
    .collect()
});

fn alternation(terms: &[&str]) -> Regex {
    let pattern = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&pattern).expect("keyword alternation is a valid regex")
}

/// Classifies a raw message by keyword membership.
///
/// Never fails; yields [`Intent::Fallback`] when no rule matches.
pub fn classify_by_keywords(message: &str) -> Intent {
    let lowered = message.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(_, pattern)| pattern.is_match(&lowered))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn order_terms_classify_as_order() {
        assert_eq!(classify_by_keywords("Where is my package?"), Intent::Order);
        assert_eq!(classify_by_keywords("What's the ETA"), Intent::Order);
        assert_eq!(classify_by_keywords("When will it arrive"), Intent::Order);
    }

    #[test]
    fn billing_terms_classify_as_billing() {
        assert_eq!(classify_by_keywords("I need a refund"), Intent::Billing);
        assert_eq!(classify_by_keywords("Why was I charged twice"), Intent::Billing);
        assert_eq!(classify_by_keywords("What do I owe?"), Intent::Billing);
    }

    #[test]
    fn support_terms_classify_as_support() {
        assert_eq!(classify_by_keywords("I forgot my password"), Intent::Support);
        assert_eq!(classify_by_keywords("How do I export data"), Intent::Support);
    }

    #[test]
    fn order_wins_over_billing() {
        assert_eq!(
            classify_by_keywords("refund for my order please"),
            Intent::Order
        );
    }

    #[test]
    fn billing_wins_over_support() {
        assert_eq!(
            classify_by_keywords("help me understand this invoice"),
            Intent::Billing
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_by_keywords("TRACK IT"), Intent::Order);
        assert_eq!(classify_by_keywords("Invoice"), Intent::Billing);
    }

    #[test]
    fn matching_uses_plain_substrings() {
        // "shipping" contains "ship"; "repayment" contains "pay"
        assert_eq!(classify_by_keywords("shipping question"), Intent::Order);
        assert_eq!(classify_by_keywords("repayment plan"), Intent::Billing);
    }

    #[test]
    fn no_match_is_fallback() {
        assert_eq!(classify_by_keywords("hello there"), Intent::Fallback);
        assert_eq!(classify_by_keywords(""), Intent::Fallback);
        assert_eq!(classify_by_keywords("good morning"), Intent::Fallback);
    }

    fn neutral_word() -> impl Strategy<Value = String> {
        // Consonants only; every keyword contains a vowel.
        "[bcdfgjklmnqvxz]{1,8}"
    }

    proptest! {
        #[test]
        fn any_message_with_an_order_term_is_order(
            prefix in neutral_word(),
            suffix in neutral_word(),
            term in proptest::sample::select(ORDER_TERMS),
            billing in proptest::option::of(proptest::sample::select(BILLING_TERMS)),
        ) {
            let mut message = format!("{} {} {}", prefix, term.to_uppercase(), suffix);
            if let Some(extra) = billing {
                message.push(' ');
                message.push_str(extra);
            }
            prop_assert_eq!(classify_by_keywords(&message), Intent::Order);
        }

        #[test]
        fn messages_without_terms_are_fallback(words in proptest::collection::vec(neutral_word(), 0..6)) {
            let message = words.join(" ");
            prop_assert_eq!(classify_by_keywords(&message), Intent::Fallback);
        }

        #[test]
        fn classification_is_always_a_known_intent(message in ".{0,64}") {
            let intent = classify_by_keywords(&message);
            prop_assert!(Intent::ALL.contains(&intent));
        }
    }
}
