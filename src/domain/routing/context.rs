//! Conversation context windows.
//!
//! The classifier and the responders both see a bounded tail of the
//! conversation, rendered as one `Label: content` line per turn. The labels
//! differ: the classifier prompt uses raw role names while responder prompts
//! speak of "Customer" and "Agent".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of prior turns embedded in a classification prompt.
pub const CLASSIFICATION_WINDOW: usize = 4;

/// Number of prior turns embedded in a responder prompt.
pub const RESPONSE_WINDOW: usize = 6;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prior message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}

/// Line prefixes used when rendering a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptLabels {
    pub user: &'static str,
    pub assistant: &'static str,
}

impl TranscriptLabels {
    /// `user:` / `assistant:` - used in classification prompts.
    pub const CLASSIFIER: TranscriptLabels = TranscriptLabels {
        user: "user",
        assistant: "assistant",
    };

    /// `Customer:` / `Agent:` - used in responder prompts.
    pub const RESPONDER: TranscriptLabels = TranscriptLabels {
        user: "Customer",
        assistant: "Agent",
    };

    fn label_for(&self, role: TurnRole) -> &'static str {
        match role {
            TurnRole::User => self.user,
            TurnRole::Assistant => self.assistant,
        }
    }
}

/// The last `window` turns of `history`, oldest first.
///
/// History shorter than the window is returned whole.
pub fn recent_turns(history: &[ConversationTurn], window: usize) -> &[ConversationTurn] {
    let start = history.len().saturating_sub(window);
    &history[start..]
}

/// Renders turns as newline-separated `Label: content` lines.
pub fn format_transcript(turns: &[ConversationTurn], labels: TranscriptLabels) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", labels.label_for(turn.role), turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}
