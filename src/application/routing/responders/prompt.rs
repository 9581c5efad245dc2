//! Prompt layout shared by the responders.

use crate::domain::routing::{
    format_transcript, recent_turns, ConversationTurn, DomainSnapshot, TranscriptLabels,
    RESPONSE_WINDOW,
};

/// Fixed parts of a responder prompt.
pub struct PromptTemplate {
    pub persona: &'static str,
    /// Heading above the JSON records; `None` for responders without data.
    pub data_heading: Option<&'static str>,
    pub guidelines: &'static [&'static str],
}

impl PromptTemplate {
    /// Renders persona, records, recent transcript and guidelines, followed by
    /// the customer's message and an open `Agent:` turn.
    pub fn render(
        &self,
        snapshot: &DomainSnapshot,
        history: &[ConversationTurn],
        message: &str,
    ) -> String {
        let mut prompt = String::from(self.persona);
        prompt.push_str("\n\n");

        if let Some(heading) = self.data_heading {
            prompt.push_str(heading);
            prompt.push('\n');
            prompt.push_str(&snapshot.to_prompt_json());
            prompt.push_str("\n\n");
        }

        prompt.push_str(&context_section(history));
        prompt.push_str("\n\nGuidelines:\n");
        prompt.push_str(
            &self
                .guidelines
                .iter()
                .map(|line| format!("- {}", line))
                .collect::<Vec<_>>()
                .join("\n"),
        );

        prompt.push_str("\n\nCustomer: ");
        prompt.push_str(message);
        prompt.push_str("\n\nAgent:");
        prompt
    }
}

fn context_section(history: &[ConversationTurn]) -> String {
    let recent = recent_turns(history, RESPONSE_WINDOW);
    if recent.is_empty() {
        return String::new();
    }
    format!(
        "\n\nPrevious conversation:\n{}",
        format_transcript(recent, TranscriptLabels::RESPONDER)
    )
}
