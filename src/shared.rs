use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::auth::IdentityVerifier;
use crate::chat::ChatClient;
use crate::config::ConfigError;
use crate::ratelimit::RateLimiter;
use crate::settings::repository::ApiKeyRepository;
use crate::upstream::{GameApiClient, UpstreamError};

/// Shared application state containing all dependencies.
/// Clients are built once at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityVerifier>,
    pub api_keys: Arc<dyn ApiKeyRepository>,
    pub game_api: Arc<dyn GameApiClient>,
    pub rate_limiter: Arc<RateLimiter>,
    pub chat: Option<Arc<dyn ChatClient>>,
}

impl AppState {
    pub fn new(
        identity: Arc<dyn IdentityVerifier>,
        api_keys: Arc<dyn ApiKeyRepository>,
        game_api: Arc<dyn GameApiClient>,
        rate_limiter: Arc<RateLimiter>,
        chat: Option<Arc<dyn ChatClient>>,
    ) -> Self {
        Self {
            identity,
            api_keys,
            game_api,
            rate_limiter,
            chat,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("No API key configured for this account")]
    ApiKeyNotSet,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Category name carried in the `type` field of error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::ApiKeyNotSet => "API_KEY_NOT_SET",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            AppError::Config(_) => "SERVER_CONFIG_ERROR",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::DatabaseError(_) | AppError::Internal => "UNKNOWN_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ApiKeyNotSet | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Network(_) => StatusCode::BAD_GATEWAY,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Config(_) | AppError::DatabaseError(_) | AppError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Forbidden => {
                AppError::Forbidden("API key is invalid or has been revoked".to_string())
            }
            UpstreamError::NotFound => {
                AppError::NotFound("No such resource for this API key".to_string())
            }
            UpstreamError::Status(status) => AppError::Upstream {
                status,
                message: format!("Upstream API returned status {}", status),
            },
            UpstreamError::Unreachable(msg) => AppError::ServiceUnavailable(msg),
            UpstreamError::Network(msg) => AppError::Network(msg),
            UpstreamError::Decode(msg) => AppError::Upstream {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                message: format!("Malformed upstream response: {}", msg),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            AppError::Config(_) | AppError::DatabaseError(_) | AppError::Internal => {
                error!(error = %self, "Request failed with server error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "type": self.error_type(),
            "error": message
        }));

        (status, body).into_response()
    }
}
