use async_trait::async_trait;
use futures::stream;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use warroom::chat::{ChatClient, ChatError, ChatMessage, ChatStream};
use warroom::domain::{GuildData, GuildRaidData, PlayerData};
use warroom::upstream::{GameApiClient, UpstreamError};

use super::fixtures;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Game API double with per-endpoint results and a call counter
pub struct MockGameApiClient {
    pub player: Result<PlayerData, UpstreamError>,
    pub guild: Result<GuildData, UpstreamError>,
    pub raids: HashMap<u32, GuildRaidData>,
    calls: AtomicUsize,
    keys_seen: Mutex<Vec<String>>,
}

impl MockGameApiClient {
    /// Serves the shared fixtures for every endpoint
    pub fn with_fixtures() -> Self {
        let raids = fixtures::season_raids().into_iter().collect();
        Self {
            player: Ok(fixtures::player_data()),
            guild: Ok(fixtures::guild_data()),
            raids,
            calls: AtomicUsize::new(0),
            keys_seen: Mutex::new(Vec::new()),
        }
    }

    /// Fails every endpoint with the same error
    pub fn failing(error: UpstreamError) -> Self {
        Self {
            player: Err(error.clone()),
            guild: Err(error),
            raids: HashMap::new(),
            calls: AtomicUsize::new(0),
            keys_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn keys_seen(&self) -> Vec<String> {
        self.keys_seen.lock().unwrap().clone()
    }

    fn record(&self, api_key: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.keys_seen.lock().unwrap().push(api_key.to_string());
    }
}

#[async_trait]
impl GameApiClient for MockGameApiClient {
    async fn get_player(&self, api_key: &str) -> Result<PlayerData, UpstreamError> {
        self.record(api_key);
        self.player.clone()
    }

    async fn get_guild(&self, api_key: &str) -> Result<GuildData, UpstreamError> {
        self.record(api_key);
        self.guild.clone()
    }

    async fn get_guild_raid(
        &self,
        api_key: &str,
        season: u32,
    ) -> Result<GuildRaidData, UpstreamError> {
        self.record(api_key);
        self.raids
            .get(&season)
            .cloned()
            .ok_or(UpstreamError::NotFound)
    }
}

/// Chat double that replays fixed deltas and keeps the prompt it was sent
pub struct MockChatClient {
    deltas: Vec<String>,
    fail_after: bool,
    prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatClient {
    pub fn new(deltas: &[&str]) -> Self {
        Self {
            deltas: deltas.iter().map(|d| d.to_string()).collect(),
            fail_after: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_after(deltas: &[&str]) -> Self {
        Self {
            fail_after: true,
            ..Self::new(deltas)
        }
    }

    pub fn last_prompt(&self) -> Option<Vec<ChatMessage>> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn stream_chat(&self, messages: Vec<ChatMessage>) -> Result<ChatStream, ChatError> {
        self.prompts.lock().unwrap().push(messages);

        let mut items: Vec<Result<String, ChatError>> =
            self.deltas.iter().cloned().map(Ok).collect();
        if self.fail_after {
            items.push(Err(ChatError::Stream("upstream reset".to_string())));
        }
        Ok(Box::pin(stream::iter(items)))
    }
}
