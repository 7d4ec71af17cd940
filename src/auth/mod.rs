// Public API - what other modules can use
pub use middleware::bearer_auth;
pub use token::{IdentityVerifier, JwtIdentityVerifier};
pub use types::{AuthenticatedUser, IdentityClaims};

// Internal modules
mod middleware;
mod token;
mod types;
