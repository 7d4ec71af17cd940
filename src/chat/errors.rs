use thiserror::Error;

use crate::shared::AppError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Chat API unreachable: {0}")]
    Unreachable(String),

    #[error("Chat API request failed: {0}")]
    Request(String),

    #[error("Chat API returned status {0}")]
    Status(u16),

    #[error("Chat stream interrupted: {0}")]
    Stream(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ChatError::Unreachable(err.to_string())
        } else {
            ChatError::Request(err.to_string())
        }
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Unreachable(msg) => AppError::ServiceUnavailable(msg),
            ChatError::Request(msg) | ChatError::Stream(msg) => AppError::Network(msg),
            ChatError::Status(status) => AppError::Upstream {
                status,
                message: format!("Chat API returned status {}", status),
            },
        }
    }
}
