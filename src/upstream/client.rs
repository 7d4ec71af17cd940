use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::errors::UpstreamError;
use crate::domain::{GuildData, GuildRaidData, PlayerData};

/// Header carrying the per-user credential on every game API call
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Read-only access to the game API on behalf of one credential
#[async_trait]
pub trait GameApiClient: Send + Sync {
    async fn get_player(&self, api_key: &str) -> Result<PlayerData, UpstreamError>;
    async fn get_guild(&self, api_key: &str) -> Result<GuildData, UpstreamError>;
    async fn get_guild_raid(&self, api_key: &str, season: u32)
        -> Result<GuildRaidData, UpstreamError>;
}

/// Game API client over HTTP
pub struct HttpGameApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGameApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, api_key: &str) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|e| {
                warn!(path, error = %e, "Game API request failed");
                UpstreamError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "Game API returned an error status");
            return Err(UpstreamError::from_status(status.as_u16()));
        }

        let body = response.text().await.map_err(UpstreamError::from)?;
        debug!(path, bytes = body.len(), "Game API response received");

        serde_json::from_str(&body).map_err(|e| {
            warn!(path, error = %e, "Game API response did not match the expected shape");
            UpstreamError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl GameApiClient for HttpGameApiClient {
    #[instrument(skip(self, api_key))]
    async fn get_player(&self, api_key: &str) -> Result<PlayerData, UpstreamError> {
        self.fetch("/player", api_key).await
    }

    #[instrument(skip(self, api_key))]
    async fn get_guild(&self, api_key: &str) -> Result<GuildData, UpstreamError> {
        self.fetch("/guild", api_key).await
    }

    #[instrument(skip(self, api_key))]
    async fn get_guild_raid(
        &self,
        api_key: &str,
        season: u32,
    ) -> Result<GuildRaidData, UpstreamError> {
        self.fetch(&format!("/guildRaid/{}", season), api_key).await
    }
}
