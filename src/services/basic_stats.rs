//! Corpus-level counts for the overview column of the dashboard.

use serde::Serialize;

use crate::models::product::ProductRecord;
use crate::models::rating::RatingRecord;
use crate::services::aggregate;

/// Table sizes and distinct counts. Empty tables yield zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicStats {
    pub num_products: u64,
    pub num_categories: u64,
    pub num_ratings: u64,
    pub num_users: u64,
}

/// Count products, distinct sub-categories, ratings and distinct raters.
pub fn calculate(products: &[ProductRecord], ratings: &[RatingRecord]) -> BasicStats {
    BasicStats {
        num_products: products.len() as u64,
        num_categories: aggregate::nunique(products.iter().map(|p| p.sub_category.as_str()))
            as u64,
        num_ratings: ratings.len() as u64,
        num_users: aggregate::nunique(ratings.iter().map(|r| r.user_id.as_str())) as u64,
    }
}
