use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use super::types::AuthenticatedUser;
use crate::shared::{AppError, AppState};

/// Bearer authentication middleware - verifies the Authorization header and adds
/// `AuthenticatedUser` to the request.
/// Usage: .layer(middleware::from_fn_with_state(app_state.clone(), auth::bearer_auth))
/// Handlers can then extract Extension(user): Extension<AuthenticatedUser>.
#[instrument(skip(state, req, next), fields(uri = %req.uri()))]
pub async fn bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header in request");
            AppError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    let user_id = state.identity.verify(token).await.ok_or_else(|| {
        warn!("Bearer token failed verification");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    debug!(user_id = %user_id, "Authentication successful");

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}
