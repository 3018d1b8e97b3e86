//! Dashboard view assembly: table previews, statistics, highlight strings and
//! the fixed chart gallery.
//!
//! Produces a serializable view model only. Markup, styling and image
//! generation belong to the client.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::AppConfig;
use crate::errors::StatsError;
use crate::models::dataset::Dataset;
use crate::models::product::ProductRecord;
use crate::models::rating::RatingRecord;
use crate::services::basic_stats::BasicStats;
use crate::services::stats_cache::StatsCache;
use crate::services::user_stats::UserStats;

/// Banner image shown above the page title.
pub const HEADER_IMAGE: &str = "insight.jpeg";

/// Pre-generated chart gallery, in display order: (key, title, file name).
pub const CHARTS: [(&str, &str, &str); 13] = [
    ("top_categories", "Top 10 most popular categories", "top10_nhomhang.png"),
    ("top_product_names", "Top 20 most popular product names", "top20_ten_sp_pho_bien.png"),
    ("price_by_category", "Price distribution by category", "phanbogia.png"),
    ("rating_by_category", "Rating distribution by category", "phanborating.png"),
    ("price_rating_correlation", "Price vs. rating by category", "tuongquan_gia_nhom_sp.png"),
    ("avg_price_by_category", "Average price by category", "gia_trung_binh_nhom.png"),
    ("avg_rating_by_category", "Average rating by category", "rating_trung_binh_nhom.png"),
    ("rating_share", "Rating share by stars", "rating_percent.png"),
    ("top_five_star_products", "Products with the most 5-star ratings", "top_sp_5_star.png"),
    ("top_five_star_categories", "Categories with the most 5-star ratings", "top_nhom_sp_5_star.png"),
    ("top_one_star_products", "Products with the most 1-star ratings", "top_sp_1_star.png"),
    ("description_length", "Product description length distribution", "phan_bo_do_dai_mo_ta.png"),
    ("description_wordcloud", "Product description word cloud", "wordcloud.png"),
];

/// One static chart in the gallery.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSection {
    pub key: &'static str,
    pub title: &'static str,
    pub asset: String,
}

/// Display-ready strings derived from `UserStats`.
#[derive(Debug, Clone, Serialize)]
pub struct Highlights {
    pub top_spend_display: String,
    pub top_product_preview: String,
    pub least_product_preview: String,
}

/// Everything the dashboard page needs in one response.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub header_image: String,
    pub product_preview: Vec<ProductRecord>,
    pub rating_preview: Vec<RatingRecord>,
    pub basic_stats: BasicStats,
    pub user_stats: Option<UserStats>,
    pub user_stats_error: Option<String>,
    /// Omitted whenever `user_stats` could not be computed.
    pub highlights: Option<Highlights>,
    pub charts: Vec<ChartSection>,
    pub generated_at: DateTime<Utc>,
}

/// Build the dashboard view for the loaded dataset.
///
/// An absent dataset is a `MissingInput` failure and nothing is computed. A
/// failed user-statistics aggregation does not fail the view: the message is
/// reported in `user_stats_error` and the highlight section is skipped.
pub fn build_view(
    dataset: Option<&Dataset>,
    cache: &StatsCache,
    config: &AppConfig,
) -> Result<DashboardView, StatsError> {
    let dataset = require_dataset(dataset)?;

    let basic_stats = cache.basic_stats(dataset);
    let (user_stats, user_stats_error) = match cache.user_stats(dataset) {
        Ok(stats) => (Some(stats), None),
        Err(e) => {
            tracing::warn!(error = %e, "Error calculating user statistics");
            (None, Some(e.to_string()))
        }
    };

    let highlights = user_stats.as_ref().map(|s| Highlights {
        top_spend_display: format_thousands(s.top_spend_amount),
        top_product_preview: truncate_name(&s.top_product_name, config.name_preview_chars),
        least_product_preview: truncate_name(&s.least_product_name, config.name_preview_chars),
    });

    Ok(DashboardView {
        header_image: asset_path(&config.assets_dir, HEADER_IMAGE),
        product_preview: head(dataset.products(), config.preview_rows),
        rating_preview: head(dataset.ratings(), config.preview_rows),
        basic_stats,
        user_stats,
        user_stats_error,
        highlights,
        charts: chart_sections(&config.assets_dir),
        generated_at: Utc::now(),
    })
}

/// Unwrap the dataset or report that the input tables are missing.
pub fn require_dataset(dataset: Option<&Dataset>) -> Result<&Dataset, StatsError> {
    dataset.ok_or_else(|| {
        StatsError::MissingInput("product and rating tables are not loaded".to_string())
    })
}

/// The chart gallery with asset paths resolved under `assets_dir`.
pub fn chart_sections(assets_dir: &str) -> Vec<ChartSection> {
    CHARTS
        .iter()
        .map(|&(key, title, file)| ChartSection {
            key,
            title,
            asset: asset_path(assets_dir, file),
        })
        .collect()
}

fn asset_path(assets_dir: &str, file: &str) -> String {
    let dir = assets_dir.trim_end_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}

fn head<T: Clone>(rows: &[T], n: usize) -> Vec<T> {
    rows.iter().take(n).cloned().collect()
}

/// Shorten a product name to `max_chars` characters, marking the cut with `...`.
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    match name.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_string(),
    }
}

/// Round to a whole number and group digits in thousands: `1234567.6` → `1,234,568`.
pub fn format_thousands(amount: f64) -> String {
    let rounded = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    if amount.is_sign_negative() && rounded != "0" {
        grouped.push('-');
    }
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
