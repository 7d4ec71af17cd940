use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::shared::AppState;
use crate::{auth, chat, ratelimit, settings, upstream};

/// Builds the application router.
///
/// Every `/api` route runs `bearer_auth` first, then the rate limiter keyed by
/// the authenticated user. `/health` is open.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/player", get(upstream::get_player))
        .route("/guild", get(upstream::get_guild))
        .route("/guild-raid/:season", get(upstream::get_guild_raid))
        .route("/validate-key", post(upstream::validate_api_key))
        .route("/stats", get(upstream::get_stats))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route("/chat", post(chat::chat))
        // Layers wrap outward: the last one added runs first
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            ratelimit::rate_limit,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::bearer_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
