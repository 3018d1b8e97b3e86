use std::env;
use std::path::PathBuf;

use crate::services::stats_cache::DEFAULT_TTL_SECS;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub products_path: PathBuf,
    pub ratings_path: PathBuf,
    pub assets_dir: String,
    pub stats_cache_ttl_secs: i64,
    pub preview_rows: usize,
    pub name_preview_chars: usize,
    pub frontend_url: String,
}

impl AppConfig {
    /// Every setting has a default; unparsable numbers fall back to it.
    pub fn from_env() -> Self {
        Self {
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            products_path: env::var("PRODUCTS_PATH")
                .unwrap_or_else(|_| "data/products.csv".to_string())
                .into(),
            ratings_path: env::var("RATINGS_PATH")
                .unwrap_or_else(|_| "data/ratings.csv".to_string())
                .into(),
            assets_dir: env::var("ASSETS_DIR").unwrap_or_else(|_| "images".to_string()),
            stats_cache_ttl_secs: env::var("STATS_CACHE_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_TTL_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_TTL_SECS),
            preview_rows: env::var("PREVIEW_ROWS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            name_preview_chars: env::var("NAME_PREVIEW_CHARS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            products_path: PathBuf::from("data/products.csv"),
            ratings_path: PathBuf::from("data/ratings.csv"),
            assets_dir: "images".to_string(),
            stats_cache_ttl_secs: DEFAULT_TTL_SECS,
            preview_rows: 10,
            name_preview_chars: 30,
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}
