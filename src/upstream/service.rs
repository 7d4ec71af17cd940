use futures::future::join_all;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument, warn};

use super::client::GameApiClient;
use super::errors::UpstreamError;
use crate::domain::{GuildData, PlayerData, SeasonRaidData};
use crate::settings::{models::UserSettingsModel, repository::ApiKeyRepository};
use crate::shared::AppError;

/// How many of the most recent raid seasons the dashboard pulls
pub const RECENT_RAID_SEASONS: usize = 2;

/// Everything one page load needs, with per-endpoint failures kept apart
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub player: PlayerData,
    pub guild: Option<GuildData>,
    pub raids: SeasonRaidData,
    /// Endpoint name to error message for every call that failed
    pub errors: BTreeMap<String, String>,
}

/// Loads the caller's stored settings, failing with `ApiKeyNotSet` when none exist
pub async fn resolve_settings(
    repo: &dyn ApiKeyRepository,
    user_id: &str,
) -> Result<UserSettingsModel, AppError> {
    repo.get_settings(user_id).await?.ok_or_else(|| {
        debug!(user_id, "No API key stored for user");
        AppError::ApiKeyNotSet
    })
}

/// Fetches player and guild concurrently, then the most recent raid seasons concurrently.
///
/// Only a failed player fetch fails the whole load; other failures are
/// recorded in `errors`.
#[instrument(skip(client, api_key))]
pub async fn fetch_dashboard(
    client: &dyn GameApiClient,
    api_key: &str,
) -> Result<DashboardData, UpstreamError> {
    let (player, guild) = tokio::join!(client.get_player(api_key), client.get_guild(api_key));

    let player = player?;
    let mut errors = BTreeMap::new();

    let guild = match guild {
        Ok(guild) => Some(guild),
        Err(e) => {
            warn!(error = %e, "Guild fetch failed, continuing without guild data");
            errors.insert("guild".to_string(), e.to_string());
            None
        }
    };

    let seasons = recent_seasons(guild.as_ref(), RECENT_RAID_SEASONS);
    let results = join_all(
        seasons
            .iter()
            .map(|&season| client.get_guild_raid(api_key, season)),
    )
    .await;

    let mut raids = SeasonRaidData::new();
    for (season, result) in seasons.into_iter().zip(results) {
        match result {
            Ok(data) => {
                raids.insert(season, data);
            }
            Err(e) => {
                warn!(season, error = %e, "Guild raid fetch failed");
                errors.insert(format!("guildRaid/{}", season), e.to_string());
            }
        }
    }

    info!(
        seasons = raids.len(),
        failures = errors.len(),
        "Dashboard data loaded"
    );

    Ok(DashboardData {
        player,
        guild,
        raids,
        errors,
    })
}

/// Highest `limit` season numbers the guild has raided in, newest first
pub fn recent_seasons(guild: Option<&GuildData>, limit: usize) -> Vec<u32> {
    let mut seasons: Vec<u32> = guild
        .and_then(|g| g.guild.as_ref())
        .map(|g| g.guild_raid_seasons.clone())
        .unwrap_or_default();

    seasons.sort_unstable_by(|a, b| b.cmp(a));
    seasons.dedup();
    seasons.truncate(limit);
    seasons
}

/// Outcome of probing a credential against the game API
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValidation {
    pub valid: bool,
    pub user_id: Option<String>,
}

/// Probes `api_key` with a player fetch. When valid, tries to discover the
/// owner's game user id from the latest raid season: the first attack whose
/// heroes all belong to the probed roster.
#[instrument(skip(client, api_key))]
pub async fn validate_api_key(
    client: &dyn GameApiClient,
    api_key: &str,
) -> Result<KeyValidation, UpstreamError> {
    let player = match client.get_player(api_key).await {
        Ok(player) => player,
        Err(UpstreamError::Forbidden) => {
            info!("API key rejected by game API");
            return Ok(KeyValidation {
                valid: false,
                user_id: None,
            });
        }
        Err(e) => return Err(e),
    };

    let user_id = discover_user_id(client, api_key, &player).await;
    info!(user_id_found = user_id.is_some(), "API key validated");

    Ok(KeyValidation {
        valid: true,
        user_id,
    })
}

async fn discover_user_id(
    client: &dyn GameApiClient,
    api_key: &str,
    player: &PlayerData,
) -> Option<String> {
    let roster: HashSet<&str> = player
        .player
        .as_ref()?
        .units
        .iter()
        .map(|u| u.id.as_str())
        .collect();

    let guild = client.get_guild(api_key).await.ok()?;
    let season = *recent_seasons(Some(&guild), 1).first()?;
    let raid = client.get_guild_raid(api_key, season).await.ok()?;

    raid.entries
        .iter()
        .find(|entry| {
            !entry.hero_details.is_empty()
                && entry
                    .hero_details
                    .iter()
                    .all(|h| roster.contains(h.unit_id.as_str()))
        })
        .map(|entry| entry.user_id.clone())
}
