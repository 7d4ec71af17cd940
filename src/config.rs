use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.tacticusgame.com/api/v1";
pub const DEFAULT_LLM_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },
}

#[derive(Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window_secs: 60,
        }
    }
}

/// Process configuration, loaded once at startup
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub upstream_base_url: String,
    pub database_url: Option<String>,
    pub llm: LlmConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Reads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary lookup, so tests need not touch process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret =
            get("JWT_SECRET").ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".into()))?;

        let rate_limit = RateLimitConfig {
            max_requests: parse_or("RATE_LIMIT_REQUESTS", get("RATE_LIMIT_REQUESTS"), 60)?,
            window_secs: parse_or("RATE_LIMIT_WINDOW_SECS", get("RATE_LIMIT_WINDOW_SECS"), 60)?,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            jwt_secret,
            upstream_base_url: get("UPSTREAM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string()),
            database_url: get("DATABASE_URL"),
            llm: LlmConfig {
                api_url: get("LLM_API_URL").unwrap_or_else(|| DEFAULT_LLM_API_URL.to_string()),
                api_key: get("LLM_API_KEY"),
                model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            },
            rate_limit,
        })
    }
}

fn redacted(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "<redacted>"
    } else {
        "<unset>"
    }
}

// Secrets stay out of logs and panic messages
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &redacted(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("upstream_base_url", &self.upstream_base_url)
            .field("database_url", &redacted(&self.database_url))
            .field("llm", &self.llm)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

fn parse_or<T>(var: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
    }
}
