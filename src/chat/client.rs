use async_trait::async_trait;
use futures::{stream, Stream, StreamExt};
use std::future::ready;
use std::pin::Pin;
use tracing::{debug, instrument, warn};

use super::errors::ChatError;
use super::types::{ChatMessage, CompletionChunk, CompletionRequest};
use crate::config::LlmConfig;

/// Stream of completion text deltas
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send>>;

/// Streaming chat completion backend
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn stream_chat(&self, messages: Vec<ChatMessage>) -> Result<ChatStream, ChatError>;
}

/// Client for OpenAI-compatible `chat/completions` endpoints
pub struct OpenAiChatClient {
    api_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiChatClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Builds a client when an API key is configured
    pub fn from_config(config: &LlmConfig) -> Option<Self> {
        config
            .api_key
            .as_ref()
            .map(|key| Self::new(&config.api_url, key, &config.model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    #[instrument(skip(self, messages), fields(model = %self.model, messages = messages.len()))]
    async fn stream_chat(&self, messages: Vec<ChatMessage>) -> Result<ChatStream, ChatError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: &messages,
            stream: true,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Chat API request failed");
                ChatError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Chat API returned an error status");
            return Err(ChatError::Status(status.as_u16()));
        }

        debug!("Chat stream opened");

        Ok(Box::pin(delta_stream(response.bytes_stream())))
    }
}

/// Turns a raw event-stream body into text deltas, ending at `[DONE]` or the
/// first transport error. A trailing line without a newline is still parsed.
fn delta_stream<S, B, E>(body: S) -> impl Stream<Item = Result<String, ChatError>> + Send
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let source = Box::pin(body);
    stream::unfold(Some((source, SseParser::default())), |state| async move {
        let (mut source, mut parser) = state?;
        let item = source.next().await;
        let (events, next) = match item {
            Some(Ok(chunk)) => (ok_events(parser.push(chunk.as_ref())), Some((source, parser))),
            Some(Err(e)) => (vec![Err(ChatError::Stream(e.to_string()))], None),
            None => (ok_events(parser.finish()), None),
        };
        Some((events, next))
    })
    .flat_map(stream::iter)
    .take_while(|event| ready(!matches!(event, Ok(SseEvent::Done))))
    .filter_map(|event| {
        ready(match event {
            Ok(SseEvent::Delta(text)) => Some(Ok(text)),
            Ok(SseEvent::Done) => None,
            Err(e) => Some(Err(e)),
        })
    })
}

fn ok_events(events: Vec<SseEvent>) -> Vec<Result<SseEvent, ChatError>> {
    events.into_iter().map(Ok).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SseEvent {
    Delta(String),
    Done,
}

/// Incremental parser for `data:` lines of an event stream.
/// Chunks may split lines (and UTF-8 sequences) anywhere, so raw bytes are
/// buffered and only complete lines are decoded.
#[derive(Default)]
pub(crate) struct SseParser {
    buffer: Vec<u8>,
}

impl SseParser {
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            events.extend(decode_line(&line));
        }
        events
    }

    /// Parses whatever is left once the body has ended
    pub fn finish(&mut self) -> Vec<SseEvent> {
        let rest = std::mem::take(&mut self.buffer);
        decode_line(&rest).into_iter().collect()
    }
}

fn decode_line(line: &[u8]) -> Option<SseEvent> {
    let line = String::from_utf8_lossy(line);
    parse_line(line.trim_end_matches(&['\r', '\n'][..]))
}

fn parse_line(line: &str) -> Option<SseEvent> {
    let data = line.strip_prefix("data:")?.trim_start();

    if data == "[DONE]" {
        return Some(SseEvent::Done);
    }

    match serde_json::from_str::<CompletionChunk>(data) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
            .filter(|content| !content.is_empty())
            .map(SseEvent::Delta),
        Err(e) => {
            debug!(error = %e, "Skipping unparsable stream line");
            None
        }
    }
}
