use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warroom::{
    auth::JwtIdentityVerifier,
    build_router,
    chat::{ChatClient, OpenAiChatClient},
    config::AppConfig,
    ratelimit::{InMemoryRateLimitStore, RateLimiter},
    settings::repository::{ApiKeyRepository, InMemoryApiKeyRepository, PostgresApiKeyRepository},
    upstream::HttpGameApiClient,
    AppState,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warroom=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment from .env");
    }

    let config = AppConfig::from_env()?;
    info!(upstream = %config.upstream_base_url, "Starting war room server");

    // Credentials persist in PostgreSQL when configured, otherwise in memory
    let api_keys: Arc<dyn ApiKeyRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::PgPool::connect(database_url).await?;
            let repo = PostgresApiKeyRepository::new(pool);
            repo.ensure_schema().await?;
            info!("Using PostgreSQL settings store");
            Arc::new(repo)
        }
        None => {
            warn!("DATABASE_URL not set, API keys will not survive a restart");
            Arc::new(InMemoryApiKeyRepository::new())
        }
    };

    let chat: Option<Arc<dyn ChatClient>> = match OpenAiChatClient::from_config(&config.llm) {
        Some(client) => {
            info!(model = %client.model(), "Chat relay enabled");
            Some(Arc::new(client))
        }
        None => {
            warn!("LLM_API_KEY not set, chat requests will fail");
            None
        }
    };

    let app_state = AppState::new(
        Arc::new(JwtIdentityVerifier::new(config.jwt_secret.clone())),
        api_keys,
        Arc::new(HttpGameApiClient::new(config.upstream_base_url.clone())),
        Arc::new(RateLimiter::new(
            Arc::new(InMemoryRateLimitStore::new()),
            &config.rate_limit,
        )),
        chat,
    );

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
