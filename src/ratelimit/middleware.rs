use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use tracing::instrument;

use crate::auth::AuthenticatedUser;
use crate::shared::{AppError, AppState};

/// Rate limiting middleware. Must run after `bearer_auth` so authenticated
/// callers are keyed by user id rather than address.
/// Usage: .route_layer(middleware::from_fn_with_state(app_state.clone(), ratelimit::rate_limit))
#[instrument(skip(state, req, next))]
pub async fn rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = limiter_key(&req);
    state.rate_limiter.check(&key).await?;
    Ok(next.run(req).await)
}

/// `user:<id>` for authenticated requests, otherwise `ip:<addr>`
pub fn limiter_key(req: &Request) -> String {
    if let Some(user) = req.extensions().get::<AuthenticatedUser>() {
        return format!("user:{}", user.user_id);
    }

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let ip = forwarded_for(req.headers())
        .or(peer)
        .unwrap_or_else(|| "unknown".to_string());
    format!("ip:{}", ip)
}

/// First hop listed in X-Forwarded-For
fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
