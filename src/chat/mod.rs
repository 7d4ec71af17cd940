// Public API - what other modules can use
pub use client::{ChatClient, ChatStream, OpenAiChatClient};
pub use errors::ChatError;
pub use handler::{chat, relay, ABORT_MARKER, DONE_SENTINEL};
pub use prompt::{build_messages, SYSTEM_PROMPT};
pub use types::{ChatMessage, ChatRequest, ChatRole};

// Internal modules
mod client;
mod errors;
mod handler;
mod prompt;
mod types;
