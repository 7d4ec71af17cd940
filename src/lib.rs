// Library crate for the war room dashboard service
// This file exposes the public API for integration tests

pub mod auth;
pub mod chat;
pub mod config;
pub mod constants;
pub mod domain;
pub mod ratelimit;
pub mod router;
pub mod settings;
pub mod shared;
pub mod stats;
pub mod upstream;

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, ConfigError};
pub use router::build_router;
pub use shared::{AppError, AppState};
pub use stats::{generate_stats_export, stats_export_to_string, StatsExport};
