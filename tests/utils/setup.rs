use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use warroom::{
    auth::JwtIdentityVerifier,
    build_router,
    chat::ChatClient,
    config::RateLimitConfig,
    ratelimit::{InMemoryRateLimitStore, RateLimiter},
    settings::repository::InMemoryApiKeyRepository,
    AppState,
};

use super::mocks::MockGameApiClient;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const TEST_SECRET: &str = "integration-secret";

pub struct TestApp {
    pub router: Router,
    pub api_keys: Arc<InMemoryApiKeyRepository>,
    pub game_api: Arc<MockGameApiClient>,
}

pub struct TestAppBuilder {
    game_api: Arc<MockGameApiClient>,
    chat: Option<Arc<dyn ChatClient>>,
    rate_limit: RateLimitConfig,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            game_api: Arc::new(MockGameApiClient::with_fixtures()),
            chat: None,
            rate_limit: RateLimitConfig {
                max_requests: 1000,
                window_secs: 60,
            },
        }
    }

    pub fn with_game_api(mut self, game_api: MockGameApiClient) -> Self {
        self.game_api = Arc::new(game_api);
        self
    }

    pub fn with_chat(mut self, chat: Arc<dyn ChatClient>) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn with_rate_limit(mut self, max_requests: usize) -> Self {
        self.rate_limit.max_requests = max_requests;
        self
    }

    pub fn build(self) -> TestApp {
        let api_keys = Arc::new(InMemoryApiKeyRepository::new());

        let state = AppState::new(
            Arc::new(JwtIdentityVerifier::new(TEST_SECRET)),
            api_keys.clone(),
            self.game_api.clone(),
            Arc::new(RateLimiter::new(
                Arc::new(InMemoryRateLimitStore::new()),
                &self.rate_limit,
            )),
            self.chat,
        );

        TestApp {
            router: build_router(state),
            api_keys,
            game_api: self.game_api,
        }
    }
}

impl TestApp {
    /// Sends one request through the full router
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    pub async fn get(&self, uri: &str, user_id: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .header("Authorization", bearer(user_id))
            .body(Body::empty())
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        user_id: &str,
        body: serde_json::Value,
    ) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", bearer(user_id))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Stores an API key (and optionally the game user id) for `user_id`
    pub async fn store_key(&self, user_id: &str, api_key: &str, game_user_id: Option<&str>) {
        let (status, _) = self
            .send_json(
                "PUT",
                "/api/settings",
                user_id,
                serde_json::json!({ "apiKey": api_key, "userId": game_user_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "storing the API key should succeed");
    }
}

pub fn bearer(user_id: &str) -> String {
    let token = JwtIdentityVerifier::new(TEST_SECRET)
        .issue_token(user_id, 1)
        .unwrap();
    format!("Bearer {}", token)
}
