use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::IdentityClaims;
use crate::shared::AppError;

/// Exchanges a bearer credential for a stable user id.
/// Any validation failure yields `None`; callers must treat that as unauthenticated.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Option<String>;
}

/// HS256 identity tokens signed with a shared secret
#[derive(Clone)]
pub struct JwtIdentityVerifier {
    secret: String,
}

impl JwtIdentityVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issues a token for `user_id`; used by local tooling and tests
    #[instrument(skip(self))]
    pub fn issue_token(&self, user_id: &str, expiration_days: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = (now + Duration::days(expiration_days)).timestamp() as usize;

        let claims = IdentityClaims {
            sub: user_id.to_string(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode identity token");
            AppError::Internal
        })
    }

    /// Validates a token and returns its claims
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<IdentityClaims, AppError> {
        decode::<IdentityClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| {
            debug!(user_id = %data.claims.sub, exp = data.claims.exp, "Identity token decoded");
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode identity token");
            AppError::Unauthorized("Invalid identity token".to_string())
        })
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Option<String> {
        self.validate_token(token)
            .ok()
            .map(|claims| claims.sub)
            .filter(|sub| !sub.is_empty())
    }
}
