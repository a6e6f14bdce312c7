use std::net::SocketAddr;

use anyhow::Context;
use ipldash::config::AppConfig;
use ipldash::{db, routes, AppState};
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ipldash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY is not set; sessions are signed with the development default");
    }

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to open user database")?;
    db::run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    let host: std::net::IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid BIND_HOST: {}", config.host))?;
    let addr = SocketAddr::from((host, config.port));
    tracing::info!(host = %addr, api_base_url = %config.api_base_url, "Starting ipldash web server");

    let app = routes::router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
