// Public API - what other modules can use
pub use client::{GameApiClient, HttpGameApiClient, API_KEY_HEADER};
pub use errors::UpstreamError;
pub use handlers::{get_guild, get_guild_raid, get_player, get_stats, validate_api_key};
pub use service::{fetch_dashboard, resolve_settings, DashboardData, KeyValidation};

// Internal modules
mod client;
mod errors;
mod handlers;
pub mod service;
mod types;
