use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use product_insight::config::AppConfig;
use product_insight::parsers::dataset;
use product_insight::services::stats_cache::StatsCache;
use product_insight::{routes, AppState};
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
                .unwrap_or_else(|_| "product_insight=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env();

    // A failed load still serves: dashboard endpoints report MISSING_INPUT.
    let dataset = match dataset::load_from_files(&config.products_path, &config.ratings_path) {
        Ok(report) => Some(report.dataset),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Failed to load dataset");
            None
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(host = %addr, "Starting Product Insight API server");

    let state = AppState::new(config, dataset);
    spawn_cache_purge(state.stats.clone());
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drop expired statistics so stale fingerprints do not linger.
fn spawn_cache_purge(stats: Arc<StatsCache>) {
    let period = stats
        .ttl()
        .to_std()
        .unwrap_or(std::time::Duration::from_secs(60))
        .max(std::time::Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let purged = stats.purge_expired(chrono::Utc::now());
            if purged > 0 {
                tracing::debug!(purged, "Purged expired stats cache entries");
            }
        }
    });
}
