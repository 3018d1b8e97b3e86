//! Immutable bundle of the product catalog and rating log.

use serde::Serialize;

use crate::models::product::ProductRecord;
use crate::models::rating::RatingRecord;
use crate::services::fingerprint;

/// Both input tables plus their content fingerprint.
///
/// Built once after loading and shared read-only; the fingerprint is the
/// memoization key for computed statistics.
#[derive(Debug, Clone)]
pub struct Dataset {
    products: Vec<ProductRecord>,
    ratings: Vec<RatingRecord>,
    fingerprint: String,
}

impl Dataset {
    pub fn new(products: Vec<ProductRecord>, ratings: Vec<RatingRecord>) -> Self {
        let fingerprint = fingerprint::compute_dataset(&products, &ratings);
        Self {
            products,
            ratings,
            fingerprint,
        }
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn ratings(&self) -> &[RatingRecord] {
        &self.ratings
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            products: self.products.len(),
            ratings: self.ratings.len(),
            fingerprint: self.fingerprint.clone(),
        }
    }
}

/// Row counts reported by the readiness probe.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub products: usize,
    pub ratings: usize,
    pub fingerprint: String,
}
