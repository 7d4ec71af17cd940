use super::types::{ChatMessage, ChatRole};

pub const SYSTEM_PROMPT: &str = "You are a tactical advisor for a squad-based mobile strategy game. \
Answer questions about the commander's roster, resources, campaign progress and guild raid \
performance. Be concise and concrete: name specific units, numbers and next steps. \
If the player data below does not cover a question, say so instead of guessing.";

const CONTEXT_PREAMBLE: &str = "Current player data:";

/// Prepends the fixed system prompt, plus the stats text when available, to
/// the caller's conversation. System messages supplied by the caller are dropped.
pub fn build_messages(stats_text: Option<&str>, history: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];

    if let Some(text) = stats_text.filter(|t| !t.trim().is_empty()) {
        messages.push(ChatMessage::system(format!("{}\n\n{}", CONTEXT_PREAMBLE, text)));
    }

    messages.extend(
        history
            .into_iter()
            .filter(|m| m.role != ChatRole::System),
    );
    messages
}
