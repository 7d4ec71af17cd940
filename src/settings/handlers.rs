use axum::{extract::State, Extension, Json};
use tracing::{info, instrument};

use super::{
    models::UserSettingsModel,
    types::{SettingsResponse, UpdateSettingsRequest},
};
use crate::auth::AuthenticatedUser;
use crate::shared::{AppError, AppState};

/// HTTP handler for reading the caller's settings
///
/// GET /api/settings
#[instrument(name = "get_settings", skip(state, user), fields(user_id = %user.user_id))]
pub async fn get_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = state.api_keys.get_settings(&user.user_id).await?;

    Ok(Json(SettingsResponse {
        has_api_key: settings.is_some(),
        user_id: settings.and_then(|s| s.game_user_id),
    }))
}

/// HTTP handler for storing or clearing the caller's upstream credential
///
/// PUT /api/settings
#[instrument(name = "update_settings", skip(state, user, request), fields(user_id = %user.user_id))]
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    let api_key = request.api_key.trim();

    if api_key.is_empty() {
        state.api_keys.delete_settings(&user.user_id).await?;
        info!("API key cleared");
        return Ok(Json(SettingsResponse {
            has_api_key: false,
            user_id: None,
        }));
    }

    let game_user_id = request
        .user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    let settings = UserSettingsModel::new(
        user.user_id.clone(),
        api_key.to_string(),
        game_user_id.clone(),
    );
    state.api_keys.save_settings(&settings).await?;

    info!(has_game_user_id = game_user_id.is_some(), "API key stored");

    Ok(Json(SettingsResponse {
        has_api_key: true,
        user_id: game_user_id,
    }))
}
