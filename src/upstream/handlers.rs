use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tracing::{info, instrument, warn};

use super::{
    service::{fetch_dashboard, resolve_settings, validate_api_key as probe_api_key},
    types::{StatsResponse, ValidateKeyRequest, ValidateKeyResponse},
};
use crate::auth::AuthenticatedUser;
use crate::domain::{GuildData, GuildRaidData, PlayerData};
use crate::shared::{AppError, AppState};
use crate::stats::{generate_stats_export, stats_export_to_string};

/// HTTP handler proxying the caller's player record
///
/// GET /api/player
#[instrument(name = "get_player", skip(state, user), fields(user_id = %user.user_id))]
pub async fn get_player(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<PlayerData>, AppError> {
    let settings = resolve_settings(state.api_keys.as_ref(), &user.user_id).await?;
    let player = state.game_api.get_player(&settings.api_key).await?;

    Ok(Json(player))
}

/// HTTP handler proxying the caller's guild
///
/// GET /api/guild
#[instrument(name = "get_guild", skip(state, user), fields(user_id = %user.user_id))]
pub async fn get_guild(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<GuildData>, AppError> {
    let settings = resolve_settings(state.api_keys.as_ref(), &user.user_id).await?;
    let guild = state.game_api.get_guild(&settings.api_key).await?;

    Ok(Json(guild))
}

/// HTTP handler proxying one guild raid season
///
/// GET /api/guild-raid/:season
/// Rejects non-numeric seasons before touching the game API
#[instrument(name = "get_guild_raid", skip(state, user), fields(user_id = %user.user_id))]
pub async fn get_guild_raid(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(season): Path<String>,
) -> Result<Json<GuildRaidData>, AppError> {
    let season: u32 = season.trim().parse().map_err(|_| {
        warn!(season = %season, "Rejected non-numeric raid season");
        AppError::InvalidRequest(format!("Season must be a number, got '{}'", season))
    })?;

    let settings = resolve_settings(state.api_keys.as_ref(), &user.user_id).await?;
    let raid = state
        .game_api
        .get_guild_raid(&settings.api_key, season)
        .await?;

    info!(season, entries = raid.entries.len(), "Guild raid fetched");
    Ok(Json(raid))
}

/// HTTP handler checking a credential before it is stored
///
/// POST /api/validate-key
#[instrument(name = "validate_api_key", skip(state, user, request), fields(user_id = %user.user_id))]
pub async fn validate_api_key(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ValidateKeyRequest>,
) -> Result<Json<ValidateKeyResponse>, AppError> {
    let api_key = request.api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::InvalidRequest("apiKey must not be empty".to_string()));
    }

    let result = probe_api_key(state.game_api.as_ref(), api_key).await?;

    Ok(Json(ValidateKeyResponse {
        valid: result.valid,
        user_id: result.user_id,
    }))
}

/// HTTP handler returning the full stats snapshot for the caller
///
/// GET /api/stats
#[instrument(name = "get_stats", skip(state, user), fields(user_id = %user.user_id))]
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<StatsResponse>, AppError> {
    let settings = resolve_settings(state.api_keys.as_ref(), &user.user_id).await?;
    let data = fetch_dashboard(state.game_api.as_ref(), &settings.api_key).await?;

    let stats = generate_stats_export(
        &data.player,
        data.guild.as_ref(),
        &data.raids,
        settings.game_user_id.as_deref(),
    )
    .ok_or_else(|| AppError::NotFound("No player data for this API key".to_string()))?;

    let text = stats_export_to_string(&stats);
    info!(
        units = stats.overview.total_units,
        has_raid = stats.raid.is_some(),
        "Stats export generated"
    );

    Ok(Json(StatsResponse {
        stats,
        text,
        errors: data.errors,
    }))
}
