pub mod config;
pub mod errors;
pub mod models;
pub mod parsers;
pub mod routes;
pub mod services;

use std::sync::Arc;

use models::dataset::Dataset;
use services::stats_cache::StatsCache;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    /// `None` when the tables could not be loaded at startup.
    pub dataset: Option<Arc<Dataset>>,
    pub stats: Arc<StatsCache>,
}

impl AppState {
    pub fn new(config: config::AppConfig, dataset: Option<Dataset>) -> Self {
        let stats = Arc::new(StatsCache::new(config.stats_cache_ttl_secs));
        Self {
            config,
            dataset: dataset.map(Arc::new),
            stats,
        }
    }
}
