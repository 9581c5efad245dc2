//! Intent - the category an inbound message is routed by.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Category a customer message is classified into.
///
/// `Support`, `Order` and `Billing` each have a dedicated responder.
/// `Fallback` is what the keyword layer yields when nothing matches; it is
/// answered with a canned reply and never reaches a responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Support,
    Order,
    Billing,
    Fallback,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 4] = [
        Intent::Support,
        Intent::Order,
        Intent::Billing,
        Intent::Fallback,
    ];

    /// Intents a completion backend is allowed to answer with.
    pub const ROUTABLE: [Intent; 3] = [Intent::Support, Intent::Order, Intent::Billing];

    /// Lowercase wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Support => "support",
            Intent::Order => "order",
            Intent::Billing => "billing",
            Intent::Fallback => "fallback",
        }
    }

    /// True for intents served by a responder.
    pub fn is_routable(&self) -> bool {
        !matches!(self, Intent::Fallback)
    }

    /// Parses a completion backend's answer.
    ///
    /// The answer is trimmed and lowercased, then accepted only if it is
    /// exactly one of the routable labels. `"fallback"`, sentences and
    /// decorated tokens such as `"order."` are rejected.
    pub fn from_label(raw: &str) -> Option<Intent> {
        let normalized = raw.trim().to_lowercase();
        Intent::ROUTABLE
            .into_iter()
            .find(|intent| intent.as_str() == normalized)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("intent", format!("unknown intent '{}'", s)))
    }
}
