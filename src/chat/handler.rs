use axum::{
    extract::State,
    response::sse::{Event, Sse},
    Extension, Json,
};
use futures::{stream, Stream, StreamExt};
use serde_json::json;
use std::convert::Infallible;
use tracing::{debug, info, instrument, warn};

use super::client::ChatStream;
use super::prompt::build_messages;
use super::types::{ChatRequest, ChatRole};
use crate::auth::AuthenticatedUser;
use crate::config::ConfigError;
use crate::shared::{AppError, AppState};
use crate::stats::{generate_stats_export, stats_export_to_string};
use crate::upstream::fetch_dashboard;

/// Appended to the transcript when the upstream stream breaks mid-response
pub const ABORT_MARKER: &str = "\n\n[Transmission aborted]";

/// Terminal event of every relayed stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// HTTP handler relaying a streamed chat completion as server-sent events
///
/// POST /api/chat
#[instrument(name = "chat", skip(state, user, request), fields(user_id = %user.user_id))]
pub async fn chat(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let client = state.chat.clone().ok_or_else(|| {
        warn!("Chat requested but no chat API key is configured");
        AppError::Config(ConfigError::MissingEnvVar("LLM_API_KEY".to_string()))
    })?;

    if !request.messages.iter().any(|m| m.role == ChatRole::User) {
        return Err(AppError::InvalidRequest(
            "messages must contain at least one user message".to_string(),
        ));
    }

    let context = stats_context(&state, &user.user_id).await;
    let messages = build_messages(context.as_deref(), request.messages);
    info!(
        messages = messages.len(),
        has_context = context.is_some(),
        "Starting chat relay"
    );

    let upstream = client.stream_chat(messages).await?;
    Ok(Sse::new(relay(upstream)))
}

/// Best-effort stats text for the caller; any failure just omits the context
async fn stats_context(state: &AppState, user_id: &str) -> Option<String> {
    let settings = match state.api_keys.get_settings(user_id).await {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            debug!("No API key stored, chatting without player context");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "Settings lookup failed, chatting without player context");
            return None;
        }
    };

    let data = fetch_dashboard(state.game_api.as_ref(), &settings.api_key)
        .await
        .map_err(|e| warn!(error = %e, "Dashboard fetch failed, chatting without player context"))
        .ok()?;

    let export = generate_stats_export(
        &data.player,
        data.guild.as_ref(),
        &data.raids,
        settings.game_user_id.as_deref(),
    )?;
    Some(stats_export_to_string(&export))
}

/// Maps completion deltas to `{"content": ...}` events and always finishes
/// with the done sentinel. A broken upstream emits the abort marker first so
/// clients keep the partial answer.
pub fn relay(upstream: ChatStream) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(Some(upstream), |state| async move {
        let mut upstream = state?;
        match upstream.next().await {
            Some(Ok(delta)) => Some((vec![content_event(&delta)], Some(upstream))),
            Some(Err(e)) => {
                warn!(error = %e, "Chat stream aborted");
                Some((vec![content_event(ABORT_MARKER), done_event()], None))
            }
            None => {
                debug!("Chat stream completed");
                Some((vec![done_event()], None))
            }
        }
    })
    .flat_map(stream::iter)
    .map(Ok)
}

fn content_event(content: &str) -> Event {
    Event::default().data(json!({ "content": content }).to_string())
}

fn done_event() -> Event {
    Event::default().data(DONE_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::bearer_auth;
    use crate::chat::{ChatClient, ChatError, ChatMessage};
    use crate::shared::test_utils::{bearer_for, AppStateBuilder};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::post,
        Router,
    };
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt; // for `oneshot`

    /// Replays fixed deltas, optionally failing after them, and records the prompt
    struct ScriptedChatClient {
        deltas: Vec<&'static str>,
        fail_after: bool,
        seen: Mutex<Vec<ChatMessage>>,
    }

    impl ScriptedChatClient {
        fn new(deltas: Vec<&'static str>, fail_after: bool) -> Self {
            Self {
                deltas,
                fail_after,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedChatClient {
        async fn stream_chat(&self, messages: Vec<ChatMessage>) -> Result<ChatStream, ChatError> {
            *self.seen.lock().unwrap() = messages;

            let mut items: Vec<Result<String, ChatError>> =
                self.deltas.iter().map(|d| Ok(d.to_string())).collect();
            if self.fail_after {
                items.push(Err(ChatError::Stream("connection reset".to_string())));
            }
            Ok(Box::pin(stream::iter(items)))
        }
    }

    fn app(client: Option<Arc<ScriptedChatClient>>) -> Router {
        let mut builder = AppStateBuilder::new();
        if let Some(client) = client {
            builder = builder.with_chat(client);
        }
        let state = builder.build();

        Router::new()
            .route("/api/chat", post(chat))
            .layer(middleware::from_fn_with_state(state.clone(), bearer_auth))
            .with_state(state)
    }

    fn chat_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("Authorization", bearer_for("user-1"))
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_relays_deltas_then_done() {
        let client = Arc::new(ScriptedChatClient::new(vec!["Hel", "lo"], false));
        let response = app(Some(client.clone()))
            .oneshot(chat_request(
                r#"{"messages":[{"role":"user","content":"hi"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = body_text(response).await;
        let hel = text.find(r#"data: {"content":"Hel"}"#).unwrap();
        let lo = text.find(r#"data: {"content":"lo"}"#).unwrap();
        let done = text.find("data: [DONE]").unwrap();
        assert!(hel < lo && lo < done);

        // No stored key, so only the fixed system prompt precedes the user turn
        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, ChatRole::System);
    }

    #[tokio::test]
    async fn test_mid_stream_failure_appends_abort_marker() {
        let client = Arc::new(ScriptedChatClient::new(vec!["partial"], true));
        let response = app(Some(client))
            .oneshot(chat_request(
                r#"{"messages":[{"role":"user","content":"hi"}]}"#,
            ))
            .await
            .unwrap();

        let text = body_text(response).await;
        assert!(text.contains(r#"data: {"content":"partial"}"#));
        let marker = text
            .find(r#"data: {"content":"\n\n[Transmission aborted]"}"#)
            .unwrap();
        let done = text.find("data: [DONE]").unwrap();
        assert!(marker < done);
    }

    #[tokio::test]
    async fn test_missing_chat_config_is_server_config_error() {
        let response = app(None)
            .oneshot(chat_request(
                r#"{"messages":[{"role":"user","content":"hi"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(body.contains("SERVER_CONFIG_ERROR"));
    }

    #[tokio::test]
    async fn test_requires_a_user_message() {
        let client = Arc::new(ScriptedChatClient::new(vec![], false));
        let response = app(Some(client))
            .oneshot(chat_request(r#"{"messages":[]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
