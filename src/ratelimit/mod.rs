// Public API - what other modules can use
pub use limiter::{InMemoryRateLimitStore, RateLimitStore, RateLimiter};
pub use middleware::{limiter_key, rate_limit};

// Internal modules
mod limiter;
mod middleware;
