use thiserror::Error;

/// Failures talking to the game API, mapped once onto `AppError` at the handler boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    #[error("API key is invalid or revoked")]
    Forbidden,

    #[error("Resource not found for this API key")]
    NotFound,

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Upstream unreachable: {0}")]
    Unreachable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Maps a non-success HTTP status onto the error taxonomy
    pub fn from_status(status: u16) -> Self {
        match status {
            403 => UpstreamError::Forbidden,
            404 => UpstreamError::NotFound,
            other => UpstreamError::Status(other),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            UpstreamError::Unreachable(err.to_string())
        } else if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Network(err.to_string())
        }
    }
}
