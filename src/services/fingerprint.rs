//! Content fingerprint of the two input tables, used as the memoization key.
//!
//! The hash covers every field of every row in order, so any edit, insertion,
//! removal or reordering produces a different key. Fields are length-prefixed
//! so adjacent values cannot run together.

use sha2::{Digest, Sha256};

use crate::models::product::ProductRecord;
use crate::models::rating::RatingRecord;

/// Compute the SHA-256 fingerprint of a product catalog and rating log pair.
pub fn compute_dataset(products: &[ProductRecord], ratings: &[RatingRecord]) -> String {
    let mut hasher = Sha256::new();

    hasher.update(b"PRODUCTS:");
    hasher.update((products.len() as u64).to_le_bytes());
    for p in products {
        field(&mut hasher, &p.product_id);
        field(&mut hasher, &p.product_name);
        field(&mut hasher, &p.sub_category);
        hasher.update(p.price.to_bits().to_le_bytes());
    }

    hasher.update(b"RATINGS:");
    hasher.update((ratings.len() as u64).to_le_bytes());
    for r in ratings {
        field(&mut hasher, &r.user_id);
        field(&mut hasher, &r.product_id);
        hasher.update(r.rating.to_le_bytes());
    }

    hex::encode(hasher.finalize())
}

fn field(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<ProductRecord> {
        vec![
            ProductRecord::new("p1", "Kettle", "Kitchen", 250000.0),
            ProductRecord::new("p2", "Mug", "Kitchen", 45000.0),
        ]
    }

    fn ratings() -> Vec<RatingRecord> {
        vec![
            RatingRecord::new("u1", "p1", 5),
            RatingRecord::new("u2", "p2", 3),
        ]
    }

    #[test]
    fn same_tables_same_fingerprint() {
        assert_eq!(
            compute_dataset(&products(), &ratings()),
            compute_dataset(&products(), &ratings())
        );
    }

    #[test]
    fn changed_rating_changes_fingerprint() {
        let mut changed = ratings();
        changed[1].rating = 4;
        assert_ne!(
            compute_dataset(&products(), &ratings()),
            compute_dataset(&products(), &changed)
        );
    }

    #[test]
    fn reordered_rows_change_fingerprint() {
        let mut reversed = ratings();
        reversed.reverse();
        assert_ne!(
            compute_dataset(&products(), &ratings()),
            compute_dataset(&products(), &reversed)
        );
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let a = vec![RatingRecord::new("u1", "1p", 5)];
        let b = vec![RatingRecord::new("u11", "p", 5)];
        assert_ne!(compute_dataset(&[], &a), compute_dataset(&[], &b));
    }

    #[test]
    fn fingerprint_is_hex_sha256() {
        let fp = compute_dataset(&products(), &ratings());
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
