use serde::{Deserialize, Serialize};

/// Claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityClaims {
    pub sub: String, // Stable user identifier
    pub exp: usize,  // Expiration timestamp (standard JWT claim)
    pub iat: usize,  // Issued at timestamp (standard JWT claim)
}

/// Verified caller, inserted into request extensions by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_claims_serialization() {
        let claims = IdentityClaims {
            sub: "user-123".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("user-123"));

        let deserialized: IdentityClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, claims);
    }
}
