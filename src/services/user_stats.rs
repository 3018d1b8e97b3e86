//! Top-entity statistics: most active reviewer, biggest spender, most
//! enthusiastic rater, and the most and least rated products.
//!
//! Ratings are left-joined to the catalog on `product_id`. Because product
//! ids are unique the join yields exactly one row per rating; rows whose
//! product does not resolve carry no price or name and are left out of the
//! spend sums and product rankings. Every ranking breaks ties in favor of
//! the key that appears first in the rating log.

use std::collections::HashMap;

use serde::Serialize;

use crate::errors::StatsError;
use crate::models::product::ProductRecord;
use crate::models::rating::RatingRecord;
use crate::services::aggregate;

/// Top-entity aggregations over the joined rating log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub top_reviewer: String,
    pub top_reviewer_count: u64,
    pub top_spender: String,
    pub top_spend_amount: f64,
    pub top_five_star_user: String,
    pub top_five_star_count: u64,
    pub top_product_name: String,
    pub least_product_name: String,
}

/// A rating row with its catalog entry, if the product id resolved.
#[derive(Debug, Clone, Copy)]
struct JoinedRating<'a> {
    rating: &'a RatingRecord,
    product: Option<&'a ProductRecord>,
}

impl JoinedRating<'_> {
    fn price(&self) -> Option<f64> {
        self.product.map(|p| p.price)
    }
}

fn left_join<'a>(
    ratings: &'a [RatingRecord],
    products: &'a [ProductRecord],
) -> Vec<JoinedRating<'a>> {
    let mut by_id: HashMap<&str, &ProductRecord> = HashMap::with_capacity(products.len());
    for p in products {
        by_id.entry(p.product_id.as_str()).or_insert(p);
    }

    ratings
        .iter()
        .map(|rating| JoinedRating {
            rating,
            product: by_id.get(rating.product_id.as_str()).copied(),
        })
        .collect()
}

/// Compute all top-entity statistics, or report the first aggregation that
/// had no rows to work with.
pub fn calculate(
    ratings: &[RatingRecord],
    products: &[ProductRecord],
) -> Result<UserStats, StatsError> {
    let joined = left_join(ratings, products);
    let unmatched = joined.iter().filter(|row| row.product.is_none()).count();
    if unmatched > 0 {
        tracing::debug!(unmatched, "Ratings reference products missing from the catalog");
    }

    let product_counts = aggregate::value_counts(
        joined
            .iter()
            .filter(|row| row.product.is_some())
            .map(|row| row.rating.product_id.as_str()),
    );
    let (most_rated_id, _) = product_counts
        .max()
        .ok_or(StatsError::Aggregation("most_rated_product"))?;
    let (least_rated_id, _) = product_counts
        .min()
        .ok_or(StatsError::Aggregation("least_rated_product"))?;

    let reviewer_counts = aggregate::value_counts(ratings.iter().map(|r| r.user_id.as_str()));
    let (top_reviewer, top_reviewer_count) = reviewer_counts
        .max()
        .ok_or(StatsError::Aggregation("top_reviewer"))?;

    let spend = aggregate::group_sum(
        joined
            .iter()
            .map(|row| (row.rating.user_id.as_str(), row.price())),
    );
    let (top_spender, top_spend_amount) = spend
        .max()
        .ok_or(StatsError::Aggregation("top_spender"))?;

    let five_star_counts = aggregate::value_counts(
        ratings
            .iter()
            .filter(|r| r.is_five_star())
            .map(|r| r.user_id.as_str()),
    );
    let (top_five_star_user, top_five_star_count) = five_star_counts
        .max()
        .ok_or(StatsError::Aggregation("top_five_star_user"))?;

    let top_product_name =
        product_name(&joined, most_rated_id).ok_or(StatsError::Aggregation("top_product_name"))?;
    let least_product_name = product_name(&joined, least_rated_id)
        .ok_or(StatsError::Aggregation("least_product_name"))?;

    tracing::debug!(
        ratings = ratings.len(),
        products = product_counts.len(),
        users = reviewer_counts.len(),
        "Computed user statistics"
    );

    Ok(UserStats {
        top_reviewer: top_reviewer.to_string(),
        top_reviewer_count,
        top_spender: top_spender.to_string(),
        top_spend_amount,
        top_five_star_user: top_five_star_user.to_string(),
        top_five_star_count,
        top_product_name: top_product_name.to_string(),
        least_product_name: least_product_name.to_string(),
    })
}

/// Name of the first joined row for `product_id` that resolved to the catalog.
fn product_name<'a>(joined: &[JoinedRating<'a>], product_id: &str) -> Option<&'a str> {
    joined
        .iter()
        .filter(|row| row.rating.product_id == product_id)
        .find_map(|row| row.product.map(|p| p.product_name.as_str()))
}
